//! Domain records exchanged with the backend.
//!
//! Field names follow the backend's JSON conventions (`_id`, `productName`,
//! `imgUrl`, `orderValue`, ...) so these types (de)serialize directly from
//! API payloads without an intermediate DTO layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Email, OrderId, OrderStatus, Price, ProductId, UserId, UserRole};

/// A dessert in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "productName")]
    pub name: String,
    /// Short description shown on the catalog card.
    pub description: String,
    /// Unit price in rupees.
    pub price: Price,
    /// Image location.
    #[serde(rename = "imgUrl")]
    pub img_url: String,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Email address; also the key customer orders are fetched by.
    pub email: Email,
    /// Role; anything unrecognised degrades to `user`.
    #[serde(default)]
    pub role: UserRole,
}

/// One line of a placed order: the product snapshot taken at checkout time
/// plus the purchased quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product identifier at the time of purchase.
    #[serde(rename = "_id")]
    pub product_id: ProductId,
    /// Product name at the time of purchase.
    #[serde(rename = "productName")]
    pub name: String,
    /// Unit price at the time of purchase.
    pub price: Price,
    /// Purchased quantity.
    pub qty: u32,
    /// Image location, when the snapshot carried one.
    #[serde(rename = "imgUrl", default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

impl OrderItem {
    /// The line total (quantity x unit price).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.qty)
    }
}

/// A submitted, priced, persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Owning user's email.
    pub email: Email,
    /// Order value computed at checkout.
    #[serde(rename = "orderValue")]
    pub order_value: Decimal,
    /// Cart line snapshots.
    pub items: Vec<OrderItem>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Server-assigned creation timestamp.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_names() {
        let json = r#"{
            "_id": "64f0c2a91e8d",
            "productName": "Belgian Truffle",
            "description": "Dark chocolate truffle cake",
            "price": 450,
            "imgUrl": "https://img.dessertlab.in/truffle.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).expect("product parses");
        assert_eq!(product.name, "Belgian Truffle");
        assert_eq!(product.price, Price::from_rupees(450));

        let back = serde_json::to_value(&product).expect("serialize");
        assert_eq!(back["productName"], "Belgian Truffle");
        assert_eq!(back["imgUrl"], "https://img.dessertlab.in/truffle.jpg");
        assert!(back.get("name").is_none());
    }

    #[test]
    fn test_order_wire_names_and_defaults() {
        let json = r#"{
            "_id": "o1",
            "email": "jane@example.com",
            "orderValue": 312.5,
            "items": [
                {"_id": "p1", "productName": "Mousse", "price": 100, "qty": 2},
                {"_id": "p2", "productName": "Tart", "price": 50, "qty": 1}
            ],
            "status": "Pending"
        }"#;
        let order: Order = serde_json::from_str(json).expect("order parses");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.created_at, None);
        assert_eq!(order.items.len(), 2);
        assert_eq!(
            order.items.first().expect("first item").line_total(),
            Decimal::from(200)
        );
    }

    #[test]
    fn test_user_role_defaults_to_user() {
        let json = r#"{
            "_id": "u1",
            "firstname": "Jane",
            "lastname": "Doe",
            "email": "jane@example.com"
        }"#;
        let user: User = serde_json::from_str(json).expect("user parses");
        assert_eq!(user.role, UserRole::User);
    }
}
