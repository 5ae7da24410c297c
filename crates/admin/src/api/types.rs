//! Request and response payloads for the admin endpoints.
//!
//! Paginated list responses carry `total` = total page count; that is the
//! backend's convention, not a row count.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dessert_lab_core::{Order, OrderStatus, Product, User};

/// Response of `GET /api/products?page&limit&search`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsPage {
    /// The requested page of products.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Total page count for the current search.
    #[serde(default = "one")]
    pub total: u32,
}

/// Response of `GET /api/users?page&limit&search`.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersPage {
    /// The requested page of users.
    #[serde(default)]
    pub users: Vec<User>,
    /// Total page count for the current search.
    #[serde(default = "one")]
    pub total: u32,
}

/// Response of `GET /api/orders?page&limit&status`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersPage {
    /// The requested page of orders.
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Total page count for the current filter.
    #[serde(default = "one")]
    pub total: u32,
}

const fn one() -> u32 {
    1
}

/// Body of `POST /api/products` and `PATCH /api/products/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    /// Display name.
    #[serde(rename = "productName")]
    pub product_name: String,
    /// Catalog description.
    pub description: String,
    /// Unit price in rupees.
    pub price: Decimal,
    /// Image location.
    #[serde(rename = "imgUrl")]
    pub img_url: String,
}

/// Body of `PATCH /api/orders/{id}`: the single-field status update.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusUpdate {
    /// The new status.
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_page_parses() {
        let json = r#"{
            "orders": [{
                "_id": "o1",
                "email": "jane@example.com",
                "orderValue": 312.5,
                "items": [],
                "status": "Pending"
            }],
            "total": 2
        }"#;
        let page: OrdersPage = serde_json::from_str(json).expect("parses");
        assert_eq!(page.orders.len(), 1);
        assert_eq!(page.total, 2);
        assert_eq!(
            page.orders.first().map(|o| o.status),
            Some(OrderStatus::Pending)
        );
    }

    #[test]
    fn test_pages_default_to_one_total() {
        let page: UsersPage = serde_json::from_str(r#"{"users": []}"#).expect("parses");
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_status_update_serializes_wire_case() {
        let update = StatusUpdate {
            status: OrderStatus::Completed,
        };
        let value = serde_json::to_value(update).expect("serialize");
        assert_eq!(value, serde_json::json!({"status": "completed"}));
    }

    #[test]
    fn test_product_payload_wire_names() {
        let payload = ProductPayload {
            product_name: "Opera Cake".to_string(),
            description: "Coffee and chocolate layers".to_string(),
            price: Decimal::from(320),
            img_url: "https://img.dessertlab.in/opera.jpg".to_string(),
        };
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["productName"], "Opera Cake");
        assert_eq!(value["imgUrl"], "https://img.dessertlab.in/opera.jpg");
    }
}
