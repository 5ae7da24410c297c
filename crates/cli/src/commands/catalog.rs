//! Catalog browsing, exercising the storefront's fetch-once view.

use dessert_lab_storefront::api::BackendClient;
use dessert_lab_storefront::catalog::{CatalogView, SortKey};
use dessert_lab_storefront::config::StorefrontConfig;

/// List one catalog page with the storefront's search/sort/paginate rules.
#[allow(clippy::print_stdout)]
pub async fn list(search: &str, sort: &str, page: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let backend = BackendClient::new(config.api_base_url.clone());

    let sort: SortKey = sort.parse()?;

    let mut view = CatalogView::new(config.page_size);
    tracing::info!("Fetching product collection...");
    view.load(&backend).await.map_err(|e| e.user_message())?;

    view.set_search(search);
    view.set_sort(sort);
    view.go_to_page(page);

    let page = view.page_view();
    println!(
        "{} match(es), page {} of {}",
        page.total_matching, page.page, page.total_pages
    );
    for product in &page.products {
        println!(
            "  {}  {}  {}",
            product.id, product.price, product.name
        );
    }

    Ok(())
}
