//! Payment-gateway client and widget contract for the UPI path.
//!
//! The gateway round trip is: create an order via the backend's gateway
//! endpoint, open the customer-side widget, then verify the widget's
//! callback server-side. The widget is modeled as an explicit asynchronous
//! operation with a single resolution point - it either completes with a
//! callback triple or is dismissed (cancellation) - rather than as an
//! uncoordinated global callback.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;
use uuid::Uuid;

/// Display name presented by the payment widget.
const MERCHANT_NAME: &str = "The Dessert Lab";

/// Errors that can occur during the gateway round trip.
///
/// Kept distinct from [`crate::api::BackendError`] so gateway failures are
/// surfaced differently from generic backend failures.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway endpoint returned a non-2xx response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Payment verification came back unsuccessful.
    #[error("verification failed: {0}")]
    Verification(String),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GatewayError {
    /// Human-readable message for the UPI error slot.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Verification(message) => message.clone(),
            Self::Api { .. } => "Failed to create order".to_string(),
            Self::Http(_) | Self::Parse(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

/// Request body for the gateway order-creation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGatewayOrder {
    /// Total to collect, rounded to two decimals.
    pub amount: Decimal,
    /// Client-generated receipt identifier.
    pub receipt: String,
    /// Free-form notes forwarded to the gateway dashboard.
    pub notes: GatewayNotes,
}

/// Notes attached to a gateway order.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayNotes {
    /// Customer email.
    pub email: String,
    /// Human-readable cart summary ("Moussex2, Tartx1").
    pub items: String,
}

/// A created gateway order, as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-side order identifier.
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Amount in minor currency units (paise), as the gateway reports it.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    /// Public key the widget is opened with.
    #[serde(rename = "keyId")]
    pub key_id: String,
}

/// The callback triple the widget hands back on completion, forwarded
/// verbatim to the verification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayCallback {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// Response of the verification endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    /// Whether the signature checked out server-side.
    pub success: bool,
    /// Optional operator-facing message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Prefill values shown in the widget.
#[derive(Debug, Clone, Default)]
pub struct WidgetPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Everything the customer-side widget needs to open.
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    /// Public key id from the created order.
    pub key_id: String,
    /// Gateway order to collect.
    pub order_id: String,
    /// Amount in minor units, as returned by the gateway.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    /// Merchant display name.
    pub name: String,
    /// Payment description line.
    pub description: String,
    /// Prefilled customer details.
    pub prefill: WidgetPrefill,
    /// Delivery address note.
    pub address: String,
}

/// How the widget resolved.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// Payment went through; verify the callback server-side.
    Completed(GatewayCallback),
    /// The customer dismissed the widget; checkout is cancelled, nothing
    /// is charged and nothing is mutated.
    Dismissed,
}

/// The customer-side payment widget.
///
/// Implemented by the embedding application (the real gateway overlay in
/// production, a scripted double in tests). `open` resolves exactly once.
pub trait PaymentWidget {
    /// Open the widget and wait for it to resolve.
    fn open(&self, options: WidgetOptions) -> impl Future<Output = WidgetEvent> + Send;
}

/// Client for the backend's payment-gateway endpoints.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: Url,
}

impl GatewayClient {
    /// Create a new gateway client. The endpoints live on the same backend
    /// as the storefront API.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Create a gateway order for the given amount.
    ///
    /// A receipt identifier is generated per call.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request or response handling fails.
    #[instrument(skip(self, notes))]
    pub async fn create_order(
        &self,
        amount: Decimal,
        notes: GatewayNotes,
    ) -> Result<GatewayOrder, GatewayError> {
        let body = CreateGatewayOrder {
            amount,
            receipt: new_receipt_id(),
            notes,
        };
        let url = self.endpoint("api/payments/razorpay/order");
        let response = check(self.client.post(&url).json(&body).send().await?).await?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }

    /// Verify a completed payment server-side.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Verification` when the backend reports an
    /// unsuccessful check, or a transport/parse error otherwise.
    #[instrument(skip(self, callback))]
    pub async fn verify(&self, callback: &GatewayCallback) -> Result<(), GatewayError> {
        let url = self.endpoint("api/payments/razorpay/verify");
        let response = self.client.post(&url).json(callback).send().await?;
        let status = response.status();
        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;
        if status.is_success() && body.success {
            return Ok(());
        }
        Err(GatewayError::Verification(body.message.unwrap_or_else(
            || "Verification failed. Please contact support.".to_string(),
        )))
    }

    /// Build the widget options for a created order.
    #[must_use]
    pub fn widget_options(
        order: &GatewayOrder,
        prefill: WidgetPrefill,
        address: String,
    ) -> WidgetOptions {
        WidgetOptions {
            key_id: order.key_id.clone(),
            order_id: order.order_id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: MERCHANT_NAME.to_string(),
            description: "Order Payment".to_string(),
            prefill,
            address,
        }
    }
}

/// Generate a fresh receipt identifier.
fn new_receipt_id() -> String {
    format!("rcpt_{}", Uuid::new_v4().simple())
}

/// Map a non-2xx response to `GatewayError::Api`.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(GatewayError::Api {
        status: status.as_u16(),
        message: message.chars().take(200).collect(),
    })
}
