//! REST backend client for the customer-facing flows.
//!
//! One `reqwest` client, JSON in and out. Every call is independent: no
//! retries, no timeouts, no de-duplication of in-flight requests - a failed
//! call surfaces one error and the operation is abandoned.

pub mod types;

use reqwest::StatusCode;
use tracing::{debug, instrument};
use url::Url;

use dessert_lab_core::{Email, Order, Product, UserId};

use types::{
    ErrorBody, LoginRequest, LoginResponse, NewOrder, ProductsResponse, Profile, ProfileUpdate,
    RegisterRequest,
};

/// The catalog fetches the entire collection in one call and paginates
/// client-side; this limit is "large enough" for the dessert catalog.
const FETCH_ALL_LIMIT: u32 = 1000;

/// Errors that can occur when talking to the REST backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
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

/// Client for the Dessert Lab REST backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new backend client for the given base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Build an absolute endpoint URL from a path below the base.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Fetch the full product collection in one call.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request or response handling fails.
    #[instrument(skip(self))]
    pub async fn fetch_all_products(&self) -> Result<Vec<Product>, BackendError> {
        let url = self.endpoint(&format!("api/products?page=1&limit={FETCH_ALL_LIMIT}"));
        let response = check(self.client.get(&url).send().await?).await?;
        let body: ProductsResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        debug!(count = body.products.len(), "Fetched product collection");
        Ok(body.products)
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails; the caller decides what
    /// that means for the cart (nothing is mutated here).
    #[instrument(skip(self, order), fields(email = %order.email))]
    pub async fn place_order(&self, order: &NewOrder) -> Result<(), BackendError> {
        let url = self.endpoint("api/orders");
        check(self.client.post(&url).json(order).send().await?).await?;
        Ok(())
    }

    /// Fetch the order history for a customer email.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request or response handling fails.
    #[instrument(skip(self))]
    pub async fn orders_for(&self, email: &Email) -> Result<Vec<Order>, BackendError> {
        let url = self.endpoint(&format!("api/orders/{email}"));
        let response = check(self.client.get(&url).send().await?).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Log a user in, returning the user record plus bearer token.
    ///
    /// All credential checking happens server-side.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Api` with the backend's message on rejected
    /// credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError> {
        let url = self.endpoint("api/users/login");
        let body = LoginRequest { email, password };
        let response = check(self.client.post(&url).json(&body).send().await?).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<(), BackendError> {
        let url = self.endpoint("api/users/register");
        check(self.client.post(&url).json(request).send().await?).await?;
        Ok(())
    }

    /// Fetch a user's profile.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request or response handling fails.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self, user_id: &UserId) -> Result<Profile, BackendError> {
        let url = self.endpoint(&format!("api/users/{user_id}/profile"));
        let response = check(self.client.get(&url).send().await?).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Update a user's profile.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("api/users/{user_id}/profile"));
        check(self.client.post(&url).json(update).send().await?).await?;
        Ok(())
    }
}

/// Map a non-2xx response to `BackendError::Api`, extracting the backend's
/// optional `message` field when present.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = extract_message(response, status).await;
    Err(BackendError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn extract_message(response: reqwest::Response, status: StatusCode) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> BackendClient {
        BackendClient::new(Url::parse(base).expect("valid url"))
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let with_slash = client("http://localhost:8080/");
        let without_slash = client("http://localhost:8080");
        assert_eq!(
            with_slash.endpoint("api/products"),
            "http://localhost:8080/api/products"
        );
        assert_eq!(
            without_slash.endpoint("api/products"),
            "http://localhost:8080/api/products"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_surfaces_http_error() {
        // Port 1 is never listening; the connection is refused immediately.
        let client = client("http://127.0.0.1:1");
        let err = client.fetch_all_products().await.expect_err("no backend");
        assert!(matches!(err, BackendError::Http(_)));
    }

    #[tokio::test]
    async fn test_login_failure_is_one_error_no_retry() {
        let client = client("http://127.0.0.1:1");
        let err = client
            .login("jane@example.com", "pw")
            .await
            .expect_err("no backend");
        assert!(matches!(err, BackendError::Http(_)));
    }
}
