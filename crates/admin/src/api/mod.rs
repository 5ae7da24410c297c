//! REST backend client for the admin panel.
//!
//! Same transport discipline as the storefront client - one `reqwest`
//! client, JSON, no retries, no timeouts - plus bearer-token
//! authentication on every call when a token is attached.

pub mod types;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use dessert_lab_core::{OrderId, OrderStatus, ProductId, UserId};

use types::{OrdersPage, ProductPayload, ProductsPage, StatusUpdate, UsersPage};

/// Errors that can occur when talking to the admin endpoints.
#[derive(Debug, thiserror::Error)]
pub enum AdminApiError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the Dessert Lab admin endpoints.
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl AdminClient {
    /// Create a new admin client without a token (login happens later).
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    /// Attach a bearer token to every subsequent call.
    #[must_use]
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.get(url))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Fetch one page of products, optionally filtered by a name search.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the request or response handling fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u32,
        limit: u32,
        search: &str,
    ) -> Result<ProductsPage, AdminApiError> {
        let url = self.endpoint(&format!(
            "api/products?page={page}&limit={limit}&search={}",
            urlencoding::encode(search)
        ));
        parse_json(check(self.get(&url).send().await?).await?).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the request fails.
    #[instrument(skip(self, payload), fields(name = %payload.product_name))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<(), AdminApiError> {
        let url = self.endpoint("api/products");
        check(self.authorize(self.client.post(&url)).json(payload).send().await?).await?;
        Ok(())
    }

    /// Update a product in place.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the request fails.
    #[instrument(skip(self, payload))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<(), AdminApiError> {
        let url = self.endpoint(&format!("api/products/{id}"));
        check(self.authorize(self.client.patch(&url)).json(payload).send().await?).await?;
        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), AdminApiError> {
        let url = self.endpoint(&format!("api/products/{id}"));
        check(self.authorize(self.client.delete(&url)).send().await?).await?;
        Ok(())
    }

    /// Fetch one page of users, optionally filtered by a name search.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the request or response handling fails.
    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        page: u32,
        limit: u32,
        search: &str,
    ) -> Result<UsersPage, AdminApiError> {
        let url = self.endpoint(&format!(
            "api/users/?page={page}&limit={limit}&search={}",
            urlencoding::encode(search)
        ));
        parse_json(check(self.get(&url).send().await?).await?).await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &UserId) -> Result<(), AdminApiError> {
        let url = self.endpoint(&format!("api/users/{id}"));
        check(self.authorize(self.client.delete(&url)).send().await?).await?;
        Ok(())
    }

    /// Fetch one page of orders, optionally filtered by status.
    ///
    /// `status = None` means all statuses (the backend treats an empty
    /// `status` parameter as no filter).
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the request or response handling fails.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        page: u32,
        limit: u32,
        status: Option<OrderStatus>,
    ) -> Result<OrdersPage, AdminApiError> {
        let status_param = status.map_or("", OrderStatus::as_wire_str);
        let url = self.endpoint(&format!(
            "api/orders/?page={page}&limit={limit}&status={status_param}"
        ));
        parse_json(check(self.get(&url).send().await?).await?).await
    }

    /// Transition an order to a new status via a single-field update.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), AdminApiError> {
        let url = self.endpoint(&format!("api/orders/{id}"));
        let body = StatusUpdate { status };
        check(self.authorize(self.client.patch(&url)).json(&body).send().await?).await?;
        Ok(())
    }
}

async fn parse_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AdminApiError> {
    response
        .json()
        .await
        .map_err(|e| AdminApiError::Parse(e.to_string()))
}

/// Map a non-2xx response to `AdminApiError::Api`, extracting the
/// backend's optional `message` field when present.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, AdminApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = extract_message(response, status).await;
    Err(AdminApiError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn extract_message(response: reqwest::Response, status: StatusCode) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        message: Option<String>,
    }

    let text = response.text().await.unwrap_or_default();
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&text)
        && let Some(message) = body.message
    {
        return message;
    }
    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        text.chars().take(200).collect()
    }
}
