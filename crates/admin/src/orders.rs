//! Order management: server-paginated, status-filtered listing with
//! pending-order transitions.
//!
//! A transition PATCHes the single status field and then re-fetches the
//! current page - the re-fetch is authoritative, there is no optimistic
//! update. Only pending orders expose actions; completed and cancelled
//! rows show a no-action indicator.

use tracing::instrument;

use dessert_lab_core::{Order, OrderId, OrderStatus};

use crate::api::types::OrdersPage;
use crate::api::AdminClient;
use crate::error::Result;

/// An admin action on a pending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Mark the order completed.
    Complete,
    /// Cancel the order.
    Cancel,
}

impl OrderAction {
    /// The status this action transitions to.
    #[must_use]
    pub const fn target_status(self) -> OrderStatus {
        match self {
            Self::Complete => OrderStatus::Completed,
            Self::Cancel => OrderStatus::Cancelled,
        }
    }
}

/// The actions available for an order in the given status.
///
/// Empty for anything but `Pending`; the panel renders a no-action
/// indicator in that case.
#[must_use]
pub const fn available_actions(status: OrderStatus) -> &'static [OrderAction] {
    if status.is_actionable() {
        &[OrderAction::Cancel, OrderAction::Complete]
    } else {
        &[]
    }
}

/// The order panel state: current page, status filter, and the rows last
/// fetched for them.
#[derive(Debug)]
pub struct OrderPanel {
    page: u32,
    limit: u32,
    status_filter: Option<OrderStatus>,
    orders: Vec<Order>,
    total_pages: u32,
}

impl OrderPanel {
    /// Create an empty panel with the given page limit, filtered to
    /// pending orders (the panel's working set).
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            status_filter: Some(OrderStatus::Pending),
            orders: Vec::new(),
            total_pages: 1,
        }
    }

    /// Rows last fetched.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Total pages reported by the last fetch.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// The active status filter; `None` lists every status.
    #[must_use]
    pub const fn status_filter(&self) -> Option<OrderStatus> {
        self.status_filter
    }

    /// Re-fetch the current page; the response is authoritative.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when the fetch fails; the
    /// previous rows are kept.
    #[instrument(skip_all, fields(page = self.page, status = ?self.status_filter))]
    pub async fn refresh(&mut self, client: &AdminClient) -> Result<()> {
        let page: OrdersPage = client
            .list_orders(self.page, self.limit, self.status_filter)
            .await?;
        self.orders = page.orders;
        self.total_pages = page.total.max(1);
        Ok(())
    }

    /// Change the status filter: back to page 1, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when the fetch fails.
    pub async fn filter(
        &mut self,
        client: &AdminClient,
        status: Option<OrderStatus>,
    ) -> Result<()> {
        self.status_filter = status;
        self.page = 1;
        self.refresh(client).await
    }

    /// Advance one page (clamped) and re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when the fetch fails.
    pub async fn next_page(&mut self, client: &AdminClient) -> Result<()> {
        if self.page < self.total_pages {
            self.page += 1;
            return self.refresh(client).await;
        }
        Ok(())
    }

    /// Go back one page (clamped) and re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when the fetch fails.
    pub async fn prev_page(&mut self, client: &AdminClient) -> Result<()> {
        if self.page > 1 {
            self.page -= 1;
            return self.refresh(client).await;
        }
        Ok(())
    }

    /// Apply an action to an order, then re-fetch the current page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AdminError::Api`] when a call fails; the
    /// rows keep their last authoritative state.
    #[instrument(skip_all, fields(id = %id, action = ?action))]
    pub async fn apply(
        &mut self,
        client: &AdminClient,
        id: &OrderId,
        action: OrderAction,
    ) -> Result<()> {
        client
            .update_order_status(id, action.target_status())
            .await?;
        self.refresh(client).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_orders_expose_both_actions() {
        let actions = available_actions(OrderStatus::Pending);
        assert_eq!(actions, &[OrderAction::Cancel, OrderAction::Complete]);
    }

    #[test]
    fn test_settled_orders_expose_no_actions() {
        // Completed/cancelled rows render the no-action indicator.
        assert!(available_actions(OrderStatus::Completed).is_empty());
        assert!(available_actions(OrderStatus::Cancelled).is_empty());
    }

    #[test]
    fn test_action_target_statuses() {
        assert_eq!(
            OrderAction::Complete.target_status(),
            OrderStatus::Completed
        );
        assert_eq!(OrderAction::Cancel.target_status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_completed_order_loses_actions_after_transition() {
        // Once a pending order is updated, a re-fetched row carrying the
        // new status has no actions left.
        let before = available_actions(OrderStatus::Pending);
        assert!(!before.is_empty());
        let after = available_actions(OrderAction::Complete.target_status());
        assert!(after.is_empty());
    }

    #[test]
    fn test_panel_defaults_to_pending_filter() {
        let panel = OrderPanel::new(3);
        assert_eq!(panel.status_filter(), Some(OrderStatus::Pending));
        assert_eq!(panel.page(), 1);
        assert_eq!(panel.total_pages(), 1);
    }

    #[tokio::test]
    async fn test_page_clamped_without_fetch_at_bounds() {
        // At the first page of a single-page list, neither move fires a
        // request (the dead-port client would error if one did).
        let client = AdminClient::new(
            url::Url::parse("http://127.0.0.1:1").expect("valid url"),
        );
        let mut panel = OrderPanel::new(3);
        panel.prev_page(&client).await.expect("clamped, no request");
        panel.next_page(&client).await.expect("clamped, no request");
        assert_eq!(panel.page(), 1);
    }
}
