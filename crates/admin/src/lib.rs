//! Dessert Lab Admin - store administration flows.
//!
//! This crate implements the admin panel as a library: product management
//! (create, update, delete over a searchable, server-paginated list),
//! order management (status-filtered, server-paginated, with
//! pending-to-completed/cancelled transitions), and user management
//! (list, search, delete).
//!
//! Admin lists use the backend's server-side pagination contract, unlike
//! the customer catalog which paginates a fetched-once collection
//! client-side. Every mutation is followed by an authoritative re-fetch of
//! the current page - there are no optimistic updates.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod orders;
pub mod products;
pub mod users;
