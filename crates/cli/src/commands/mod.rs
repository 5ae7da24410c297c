//! CLI command implementations.

pub mod catalog;
pub mod orders;
pub mod products;
pub mod users;

use dessert_lab_admin::api::AdminClient;
use dessert_lab_admin::config::AdminConfig;

/// Build an admin client from the environment, attaching the bootstrap
/// token when one is configured.
pub fn admin_client() -> Result<(AdminClient, AdminConfig), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let mut client = AdminClient::new(config.api_base_url.clone());
    if let Some(token) = &config.admin_token {
        client = client.with_token(token.clone());
    }
    Ok((client, config))
}
