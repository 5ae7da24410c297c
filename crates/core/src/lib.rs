//! Dessert Lab Core - Shared types library.
//!
//! This crate provides common types used across all Dessert Lab components:
//! - `storefront` - Customer-facing shopping flows
//! - `admin` - Store administration flows
//! - `cli` - Command-line management tool
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no runtime. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`models`] - Domain records exchanged with the backend (products, users, orders)
//! - [`cart`] - The in-session shopping cart and its mutation contract
//! - [`pricing`] - Derived order pricing (subtotal, delivery fee, tax, total)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod models;
pub mod pricing;
pub mod types;

pub use cart::{Cart, CartLine};
pub use models::{Order, OrderItem, Product, User};
pub use pricing::PricingBreakdown;
pub use types::*;
