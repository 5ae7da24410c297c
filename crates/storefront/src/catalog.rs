//! The product catalog view: fetch once, then search, sort and paginate
//! client-side.
//!
//! The whole collection is fetched in a single call and every query runs
//! over the materialized list, in this order: case-insensitive substring
//! filter over name and description, then sort, then fixed-size
//! pagination. This is acceptable only because the dessert catalog is
//! small; it is not a pattern for large catalogs.

use tracing::instrument;

use dessert_lab_core::Product;

use crate::api::BackendClient;
use crate::error::AppError;

/// Sort order of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Name, lexicographic ascending (case-insensitive).
    #[default]
    Name,
    /// Price, low to high.
    PriceLowToHigh,
    /// Price, high to low.
    PriceHighToLow,
}

impl SortKey {
    /// The query-parameter value this key is known by.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLowToHigh => "price-low",
            Self::PriceHighToLow => "price-high",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price-low" => Ok(Self::PriceLowToHigh),
            "price-high" => Ok(Self::PriceHighToLow),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// The products on this page, filtered and sorted.
    pub products: Vec<Product>,
    /// 1-based page index actually shown (after any reset).
    pub page: usize,
    /// Total pages for the current filter; zero when nothing matches.
    pub total_pages: usize,
    /// How many products match the current filter across all pages.
    pub total_matching: usize,
}

/// The catalog view state: the fetched collection plus the current query.
#[derive(Debug)]
pub struct CatalogView {
    products: Vec<Product>,
    search: String,
    sort: SortKey,
    page: usize,
    page_size: usize,
}

impl CatalogView {
    /// Create an empty view with the given page size.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            products: Vec::new(),
            search: String::new(),
            sort: SortKey::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Fetch the full collection (once per view lifetime, re-callable to
    /// refresh).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Backend`] when the fetch fails; the previously
    /// loaded collection is left as-is.
    #[instrument(skip_all)]
    pub async fn load(&mut self, backend: &BackendClient) -> Result<(), AppError> {
        self.products = backend.fetch_all_products().await?;
        Ok(())
    }

    /// Total number of products in the fetched collection.
    #[must_use]
    pub fn total_products(&self) -> usize {
        self.products.len()
    }

    /// Replace the search term.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Replace the sort order.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Jump to a specific (1-based) page.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page, clamped to the last.
    pub fn next_page(&mut self) {
        let total = self.current_total_pages();
        if self.page < total {
            self.page += 1;
        }
    }

    /// Go back one page, clamped to the first.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Render the current page, applying filter, sort and pagination.
    ///
    /// When the filtered set no longer reaches the current page's start
    /// offset the page index resets to 1 (and stays reset).
    pub fn page_view(&mut self) -> CatalogPage {
        let matching = filter_and_sort(&self.products, &self.search, self.sort);
        let total_matching = matching.len();
        let total_pages = total_matching.div_ceil(self.page_size);

        if self.page > total_pages {
            self.page = 1;
        }

        let start = (self.page - 1) * self.page_size;
        let products = matching
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();

        CatalogPage {
            products,
            page: self.page,
            total_pages,
            total_matching,
        }
    }

    fn current_total_pages(&self) -> usize {
        filter_and_sort(&self.products, &self.search, self.sort)
            .len()
            .div_ceil(self.page_size)
    }
}

/// Filter by case-insensitive substring over name and description, then
/// sort. The sort is stable, so equal keys keep their fetched order.
fn filter_and_sort<'a>(products: &'a [Product], search: &str, sort: SortKey) -> Vec<&'a Product> {
    let needle = search.to_lowercase();
    let mut matching: Vec<&Product> = products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect();

    match sort {
        SortKey::Name => {
            matching.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortKey::PriceLowToHigh => matching.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHighToLow => matching.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use dessert_lab_core::{Price, ProductId};

    fn product(id: &str, name: &str, description: &str, rupees: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            price: Price::from_rupees(rupees),
            img_url: String::new(),
        }
    }

    /// Ten products, three of which mention chocolate.
    fn ten_products() -> Vec<Product> {
        vec![
            product("p0", "Vanilla Sponge", "light vanilla cake", 180),
            product("p1", "Chocolate Brownie", "dense cocoa square", 120),
            product("p2", "Lemon Tart", "sharp citrus tart", 210),
            product("p3", "Dark Chocolate Mousse", "rich and airy", 260),
            product("p4", "Strawberry Shortcake", "fresh berries", 240),
            product("p5", "Baklava", "pistachio and honey", 310),
            product("p6", "Truffle Cake", "layered chocolate ganache", 450),
            product("p7", "Rasmalai", "saffron milk dumplings", 150),
            product("p8", "Macaron Box", "assorted shells", 520),
            product("p9", "Cheesecake", "baked classic", 340),
        ]
    }

    fn view_with(products: Vec<Product>, page_size: usize) -> CatalogView {
        let mut view = CatalogView::new(page_size);
        view.products = products;
        view
    }

    #[test]
    fn test_search_sort_paginate_scenario() {
        // 10 products, search matching 3, sort price-low, page size 9:
        // one page with exactly those 3 in ascending price order.
        let mut view = view_with(ten_products(), 9);
        view.set_search("chocolate");
        view.set_sort(SortKey::PriceLowToHigh);

        let page = view.page_view();
        assert_eq!(page.total_matching, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        let names: Vec<&str> = page.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Chocolate Brownie", "Dark Chocolate Mousse", "Truffle Cake"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let mut view = view_with(ten_products(), 9);
        view.set_search("PISTACHIO");
        let page = view.page_view();
        assert_eq!(page.total_matching, 1);
        assert_eq!(
            page.products.first().map(|p| p.name.as_str()),
            Some("Baklava")
        );
    }

    #[test]
    fn test_name_sort_ascending() {
        let mut view = view_with(ten_products(), 20);
        view.set_sort(SortKey::Name);
        let page = view.page_view();
        let names: Vec<&str> = page.products.iter().map(|p| p.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_by_key(|n| n.to_lowercase());
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_price_high_to_low() {
        let mut view = view_with(ten_products(), 20);
        view.set_sort(SortKey::PriceHighToLow);
        let page = view.page_view();
        let prices: Vec<_> = page.products.iter().map(|p| p.price).collect();
        let mut sorted = prices.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(prices, sorted);
    }

    #[test]
    fn test_pagination_splits_pages() {
        let mut view = view_with(ten_products(), 9);
        let first = view.page_view();
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.products.len(), 9);

        view.next_page();
        let second = view.page_view();
        assert_eq!(second.page, 2);
        assert_eq!(second.products.len(), 1);

        // Clamped at the last page
        view.next_page();
        assert_eq!(view.page_view().page, 2);
    }

    #[test]
    fn test_page_resets_when_filter_shrinks_result() {
        let mut view = view_with(ten_products(), 9);
        view.next_page();
        assert_eq!(view.page_view().page, 2);

        // Narrow the filter so page 2's start offset no longer exists
        view.set_search("chocolate");
        let page = view.page_view();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_no_matches_yields_empty_first_page() {
        let mut view = view_with(ten_products(), 9);
        view.set_search("no such dessert");
        let page = view.page_view();
        assert_eq!(page.total_matching, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(page.products.is_empty());
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price-low".parse::<SortKey>(), Ok(SortKey::PriceLowToHigh));
        assert_eq!("name".parse::<SortKey>(), Ok(SortKey::Name));
        assert!("newest".parse::<SortKey>().is_err());
    }
}
