//! Unified error handling for the customer-facing flows.
//!
//! The taxonomy follows three recoverable classes: field-level validation
//! errors (block submission, shown inline), backend errors (one message,
//! operation abandoned, no retry), and gateway errors (surfaced distinctly,
//! never mutating the cart). No error is fatal; every failure path returns
//! the flow to an interactive state, and only human-readable strings reach
//! the user.

use thiserror::Error;

use crate::api::BackendError;
use crate::checkout::form::FormErrors;
use crate::checkout::gateway::GatewayError;
use crate::checkout::postal::PostalError;

/// Application-level error type for the storefront flows.
#[derive(Debug, Error)]
pub enum AppError {
    /// Field-level validation failed; submission is blocked.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FormErrors),

    /// A backend call failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// A payment-gateway step failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Postal lookup failed (degrades to manual entry).
    #[error("Postal lookup error: {0}")]
    Postal(#[from] PostalError),

    /// Checkout was attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// An operation requiring a logged-in user was attempted anonymously.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl AppError {
    /// The human-readable message shown to the user.
    ///
    /// Internal detail (statuses, transport errors) stays in the logs;
    /// the user sees the same phrasing the storefront always used.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please correct the highlighted fields".to_string(),
            Self::Backend(BackendError::Api { message, .. }) if !message.is_empty() => {
                message.clone()
            }
            Self::Backend(_) => "Something went wrong".to_string(),
            Self::Gateway(err) => err.user_message(),
            Self::Postal(_) => {
                "Network error during PIN lookup. Please fill manually.".to_string()
            }
            Self::EmptyCart => {
                "Your cart is empty! Please add items before placing an order.".to_string()
            }
            Self::NotAuthenticated => "Please log in to continue".to_string(),
        }
    }

    /// The field-level errors, when this is a validation failure.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FormErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
