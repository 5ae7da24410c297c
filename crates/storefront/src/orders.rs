//! The customer's order-history view.
//!
//! Fetched once for the current user's email and rendered read-only; the
//! admin panel owns all status transitions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::instrument;

use dessert_lab_core::{Order, OrderId, OrderStatus};

use crate::api::BackendClient;
use crate::error::AppError;
use crate::session::SessionContext;

/// One rendered line of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineView {
    /// Product name at purchase time.
    pub name: String,
    /// Unit price at purchase time.
    pub price: Decimal,
    /// Purchased quantity.
    pub qty: u32,
    /// Quantity x unit price.
    pub line_total: Decimal,
}

/// One rendered order card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    /// Order identifier.
    pub id: OrderId,
    /// Order value as persisted at checkout.
    pub order_value: Decimal,
    /// Current status.
    pub status: OrderStatus,
    /// When the backend recorded the order, if known.
    pub created_at: Option<DateTime<Utc>>,
    /// Lines in persisted order.
    pub lines: Vec<OrderLineView>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            order_value: order.order_value,
            status: order.status,
            created_at: order.created_at,
            lines: order
                .items
                .iter()
                .map(|item| OrderLineView {
                    name: item.name.clone(),
                    price: item.price.amount(),
                    qty: item.qty,
                    line_total: item.line_total(),
                })
                .collect(),
        }
    }
}

/// Fetch the order history for the logged-in customer.
///
/// # Errors
///
/// - [`AppError::NotAuthenticated`] when nobody is logged in.
/// - [`AppError::Backend`] when the fetch fails.
#[instrument(skip_all)]
pub async fn fetch_order_history(
    session: &SessionContext,
    backend: &BackendClient,
) -> Result<Vec<OrderView>, AppError> {
    let user = session
        .current_user()
        .ok_or(AppError::NotAuthenticated)?;
    let orders = backend.orders_for(&user.user.email).await?;
    Ok(orders.iter().map(OrderView::from).collect())
}
