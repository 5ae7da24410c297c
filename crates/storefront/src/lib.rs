//! Dessert Lab Storefront - customer-facing shopping flows.
//!
//! This crate implements the customer side of the client as a library:
//! the catalog view, the session-held cart, the checkout/payment flow
//! (card, UPI via the payment gateway, cash on delivery), and the order
//! history view, together with the REST clients they consume.
//!
//! Routing and rendering are external collaborators: flows return view
//! data and emit [`session::NavigationIntent`] values instead of owning
//! routes or markup. Authentication is entirely server-side - this crate
//! only forwards credentials and keeps the returned bearer token in the
//! session context.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orders;
pub mod session;
