//! Error handling for the admin flows.
//!
//! Two recoverable classes: form validation failures (block submission,
//! shown inline) and backend failures (one human-readable message, the
//! operation is abandoned and the panel stays on its last authoritative
//! state). Nothing here is fatal.

use thiserror::Error;

use crate::api::AdminApiError;
use crate::products::ProductFormErrors;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AdminError {
    /// A backend call failed.
    #[error("API error: {0}")]
    Api(#[from] AdminApiError),

    /// Product form validation failed; submission is blocked.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(ProductFormErrors),
}

impl AdminError {
    /// The human-readable message shown in the panel's status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(AdminApiError::Api { message, .. }) if !message.is_empty() => message.clone(),
            Self::Api(_) => "Something went wrong".to_string(),
            Self::Validation(_) => "Please correct the highlighted fields".to_string(),
        }
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
