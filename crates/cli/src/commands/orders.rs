//! Order management commands.

use dessert_lab_admin::orders::{available_actions, OrderAction, OrderPanel};
use dessert_lab_core::{OrderId, OrderStatus};

use super::admin_client;

/// List one server-paginated page of orders, optionally status-filtered.
#[allow(clippy::print_stdout)]
pub async fn list(status: Option<&str>, page: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (client, config) = admin_client()?;
    let mut panel = OrderPanel::new(config.orders_page_limit);

    let filter = match status {
        Some(raw) => Some(raw.parse::<OrderStatus>()?),
        None => None,
    };
    panel.filter(&client, filter).await.map_err(|e| e.user_message())?;
    while panel.page() < page && panel.page() < panel.total_pages() {
        panel.next_page(&client).await.map_err(|e| e.user_message())?;
    }

    println!("Page {} of {}", panel.page(), panel.total_pages());
    for order in panel.orders() {
        let actions = if available_actions(order.status).is_empty() {
            "no actions"
        } else {
            "cancel | complete"
        };
        println!(
            "  {}  \u{20b9}{}  {}  [{}]",
            order.id, order.order_value, order.status, actions
        );
    }
    Ok(())
}

/// Apply a pending-order transition and show the authoritative result.
#[allow(clippy::print_stdout)]
pub async fn transition(id: &str, action: OrderAction) -> Result<(), Box<dyn std::error::Error>> {
    let (client, config) = admin_client()?;
    let mut panel = OrderPanel::new(config.orders_page_limit);
    panel
        .apply(&client, &OrderId::new(id), action)
        .await
        .map_err(|e| e.user_message())?;
    println!("Order {} -> {}", id, action.target_status());
    Ok(())
}
