//! User management commands.

use dessert_lab_admin::users::UserPanel;
use dessert_lab_core::UserId;

use super::admin_client;

/// List one server-paginated page of users.
#[allow(clippy::print_stdout)]
pub async fn list(search: &str, page: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (client, config) = admin_client()?;
    let mut panel = UserPanel::new(config.users_page_limit);
    panel.search(&client, search).await.map_err(|e| e.user_message())?;
    while panel.page() < page && panel.page() < panel.total_pages() {
        panel.next_page(&client).await.map_err(|e| e.user_message())?;
    }

    println!("Page {} of {}", panel.page(), panel.total_pages());
    for user in panel.users() {
        println!(
            "  {}  {} {}  {}  ({})",
            user.id, user.firstname, user.lastname, user.email, user.role
        );
    }
    Ok(())
}

/// Delete a user by id.
#[allow(clippy::print_stdout)]
pub async fn delete(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (client, config) = admin_client()?;
    let mut panel = UserPanel::new(config.users_page_limit);
    panel
        .delete(&client, &UserId::new(id))
        .await
        .map_err(|e| e.user_message())?;
    println!("User deleted successfully.");
    Ok(())
}
