//! Request and response payloads for the REST backend.
//!
//! Field names match the backend's JSON exactly (`userId`, `orderValue`,
//! `phoneNo`, ...); everything else in the crate works with the domain
//! types from `dessert-lab-core`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dessert_lab_core::{Email, OrderItem, Product, User, UserId};

/// Response of `GET /api/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    /// The fetched page of products.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Total page count (the backend's pagination convention).
    #[serde(default)]
    pub total: Option<u32>,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    /// The ordering user.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// The ordering user's email; customer order history is keyed by it.
    pub email: Email,
    /// Order value computed by the checkout flow, rounded to two decimals.
    #[serde(rename = "orderValue")]
    pub order_value: Decimal,
    /// Cart line snapshots.
    pub items: Vec<OrderItem>,
}

/// Body of `POST /api/users/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /api/users/login`: the user record plus a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// Body of `POST /api/users/register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `GET /api/users/{id}/profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "phoneNo", default)]
    pub phone_no: Option<String>,
}

/// Body of `POST /api/users/{id}/profile`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "phoneNo", skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Optional error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
