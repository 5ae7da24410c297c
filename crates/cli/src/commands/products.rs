//! Product management commands.

use dessert_lab_admin::products::{ProductForm, ProductPanel};
use dessert_lab_core::ProductId;

use super::admin_client;

/// List one server-paginated page of products.
#[allow(clippy::print_stdout)]
pub async fn list(search: &str, page: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (client, config) = admin_client()?;
    let mut panel = ProductPanel::new(config.products_page_limit);
    panel.search(&client, search).await.map_err(|e| e.user_message())?;
    while panel.page() < page && panel.page() < panel.total_pages() {
        panel.next_page(&client).await.map_err(|e| e.user_message())?;
    }

    println!("Page {} of {}", panel.page(), panel.total_pages());
    for product in panel.products() {
        println!("  {}  {}  {}", product.id, product.price, product.name);
    }
    Ok(())
}

/// Validate and create a product.
#[allow(clippy::print_stdout)]
pub async fn add(
    name: &str,
    description: &str,
    price: &str,
    img_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (client, config) = admin_client()?;
    let mut panel = ProductPanel::new(config.products_page_limit);

    let form = ProductForm {
        product_name: name.to_string(),
        description: description.to_string(),
        price: price.to_string(),
        img_url: img_url.to_string(),
    };

    panel.add(&client, &form).await.map_err(|e| e.user_message())?;
    println!("Product added successfully.");
    Ok(())
}

/// Delete a product by id.
#[allow(clippy::print_stdout)]
pub async fn delete(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (client, config) = admin_client()?;
    let mut panel = ProductPanel::new(config.products_page_limit);
    panel
        .delete(&client, &ProductId::new(id))
        .await
        .map_err(|e| e.user_message())?;
    println!("Product deleted successfully.");
    Ok(())
}
