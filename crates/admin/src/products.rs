//! Product management: a searchable, server-paginated list with a typed
//! create/update form.
//!
//! Every mutation is followed by an authoritative re-fetch of the current
//! page; the panel never patches its local list optimistically.

use rust_decimal::Decimal;
use tracing::instrument;

use dessert_lab_core::{Product, ProductId};

use crate::api::types::{ProductPayload, ProductsPage};
use crate::api::AdminClient;
use crate::error::{AdminError, Result};

/// A product form field, for inline error display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
    Price,
    ImgUrl,
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFormError {
    /// Which field failed.
    pub field: ProductField,
    /// The inline message shown next to it.
    pub message: String,
}

/// The collected failures of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFormErrors(Vec<ProductFormError>);

impl ProductFormErrors {
    fn push(&mut self, field: ProductField, message: &str) {
        self.0.push(ProductFormError {
            field,
            message: message.to_string(),
        });
    }

    /// Whether the pass found no failures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message for a specific field, if it failed.
    #[must_use]
    pub fn get(&self, field: ProductField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// The product create/update form, as typed (price still a string).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub product_name: String,
    pub description: String,
    pub price: String,
    pub img_url: String,
}

impl ProductForm {
    /// Prefill the form from an existing product, for editing.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount().to_string(),
            img_url: product.img_url.clone(),
        }
    }

    /// Validate the form into a submittable payload.
    ///
    /// # Errors
    ///
    /// Returns the field-level failures when any field is empty or the
    /// price does not parse as a non-negative decimal.
    pub fn validate(&self) -> std::result::Result<ProductPayload, ProductFormErrors> {
        let mut errors = ProductFormErrors::default();

        if self.product_name.trim().is_empty() {
            errors.push(ProductField::Name, "Product name is required");
        }
        if self.description.trim().is_empty() {
            errors.push(ProductField::Description, "Description is required");
        }
        if self.img_url.trim().is_empty() {
            errors.push(ProductField::ImgUrl, "Image URL is required");
        }

        let price = match self.price.trim().parse::<Decimal>() {
            Ok(price) if !price.is_sign_negative() => Some(price),
            Ok(_) => {
                errors.push(ProductField::Price, "Price cannot be negative");
                None
            }
            Err(_) => {
                errors.push(ProductField::Price, "Price must be a number");
                None
            }
        };

        match price {
            Some(price) if errors.is_empty() => Ok(ProductPayload {
                product_name: self.product_name.trim().to_string(),
                description: self.description.trim().to_string(),
                price,
                img_url: self.img_url.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// The product panel state: current page, search term, and the rows last
/// fetched for them.
#[derive(Debug)]
pub struct ProductPanel {
    page: u32,
    limit: u32,
    search: String,
    products: Vec<Product>,
    total_pages: u32,
    editing: Option<ProductId>,
}

impl ProductPanel {
    /// Create an empty panel with the given page limit.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: String::new(),
            products: Vec::new(),
            total_pages: 1,
            editing: None,
        }
    }

    /// Rows last fetched.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
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

    /// The product currently being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<&ProductId> {
        self.editing.as_ref()
    }

    /// Re-fetch the current page; the response is authoritative.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Api`] when the fetch fails; the previous rows
    /// are kept.
    #[instrument(skip_all, fields(page = self.page, search = %self.search))]
    pub async fn refresh(&mut self, client: &AdminClient) -> Result<()> {
        let page: ProductsPage = client
            .list_products(self.page, self.limit, &self.search)
            .await?;
        self.products = page.products;
        self.total_pages = page.total.max(1);
        Ok(())
    }

    /// Apply a new search term: back to page 1, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Api`] when the fetch fails.
    pub async fn search(&mut self, client: &AdminClient, term: &str) -> Result<()> {
        self.search = term.to_string();
        self.page = 1;
        self.refresh(client).await
    }

    /// Advance one page (clamped) and re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Api`] when the fetch fails.
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
    /// Returns [`AdminError::Api`] when the fetch fails.
    pub async fn prev_page(&mut self, client: &AdminClient) -> Result<()> {
        if self.page > 1 {
            self.page -= 1;
            return self.refresh(client).await;
        }
        Ok(())
    }

    /// Validate and create a product, then re-fetch the current page.
    ///
    /// # Errors
    ///
    /// [`AdminError::Validation`] on a rejected form, [`AdminError::Api`]
    /// on a failed call.
    #[instrument(skip_all)]
    pub async fn add(&mut self, client: &AdminClient, form: &ProductForm) -> Result<()> {
        let payload = form.validate().map_err(AdminError::Validation)?;
        client.create_product(&payload).await?;
        self.refresh(client).await
    }

    /// Start editing a product; returns the prefilled form.
    pub fn begin_edit(&mut self, product: &Product) -> ProductForm {
        self.editing = Some(product.id.clone());
        ProductForm::from_product(product)
    }

    /// Abandon the edit in progress.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validate and apply the edit in progress, then re-fetch.
    ///
    /// # Errors
    ///
    /// [`AdminError::Validation`] on a rejected form, [`AdminError::Api`]
    /// on a failed call. The edit state survives a failure so the admin
    /// can retry.
    #[instrument(skip_all)]
    pub async fn update(&mut self, client: &AdminClient, form: &ProductForm) -> Result<()> {
        let Some(id) = self.editing.clone() else {
            return Ok(());
        };
        let payload = form.validate().map_err(AdminError::Validation)?;
        client.update_product(&id, &payload).await?;
        self.editing = None;
        self.refresh(client).await
    }

    /// Delete a product, then re-fetch the current page.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Api`] when a call fails.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&mut self, client: &AdminClient, id: &ProductId) -> Result<()> {
        client.delete_product(id).await?;
        self.refresh(client).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dessert_lab_core::Price;

    fn valid_form() -> ProductForm {
        ProductForm {
            product_name: "Opera Cake".to_string(),
            description: "Coffee and chocolate layers".to_string(),
            price: "320".to_string(),
            img_url: "https://img.dessertlab.in/opera.jpg".to_string(),
        }
    }

    #[test]
    fn test_valid_form_produces_payload() {
        let payload = valid_form().validate().expect("valid form");
        assert_eq!(payload.product_name, "Opera Cake");
        assert_eq!(payload.price, Decimal::from(320));
    }

    #[test]
    fn test_empty_fields_rejected() {
        let errors = ProductForm::default().validate().expect_err("empty form");
        assert_eq!(errors.len(), 4);
        assert!(errors.get(ProductField::Name).is_some());
        assert!(errors.get(ProductField::Price).is_some());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut form = valid_form();
        form.price = "-5".to_string();
        let errors = form.validate().expect_err("negative price");
        assert_eq!(errors.get(ProductField::Price), Some("Price cannot be negative"));
    }

    #[test]
    fn test_non_numeric_price_rejected() {
        let mut form = valid_form();
        form.price = "free".to_string();
        let errors = form.validate().expect_err("bad price");
        assert_eq!(errors.get(ProductField::Price), Some("Price must be a number"));
    }

    #[test]
    fn test_decimal_price_accepted() {
        let mut form = valid_form();
        form.price = "99.50".to_string();
        let payload = form.validate().expect("decimal price");
        assert_eq!(payload.price, Decimal::new(9950, 2));
    }

    #[test]
    fn test_edit_roundtrip_prefills_form() {
        let product = Product {
            id: ProductId::new("p1"),
            name: "Opera Cake".to_string(),
            description: "Coffee and chocolate layers".to_string(),
            price: Price::from_rupees(320),
            img_url: "https://img.dessertlab.in/opera.jpg".to_string(),
        };
        let mut panel = ProductPanel::new(6);
        let form = panel.begin_edit(&product);
        assert_eq!(panel.editing(), Some(&ProductId::new("p1")));
        assert_eq!(form.price, "320");

        panel.cancel_edit();
        assert_eq!(panel.editing(), None);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_rows() {
        let client = AdminClient::new(
            url::Url::parse("http://127.0.0.1:1").expect("valid url"),
        );
        let mut panel = ProductPanel::new(6);
        let err = panel.refresh(&client).await.expect_err("no backend");
        assert_eq!(err.user_message(), "Something went wrong");
        assert!(panel.products().is_empty());
        assert_eq!(panel.page(), 1);
    }
}
