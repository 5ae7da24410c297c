//! Status and role enums shared across the client.
//!
//! Wire formats follow the backend's existing conventions, quirks included:
//! order statuses are stored as `"Pending"`, `"completed"` and `"cancelled"`
//! (note the mixed casing), so the serde renames below are per-variant
//! rather than a uniform `rename_all`.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Awaiting fulfilment; the only status with admin actions.
    #[default]
    #[serde(rename = "Pending", alias = "pending")]
    Pending,
    /// Fulfilled by an admin.
    #[serde(rename = "completed", alias = "Completed")]
    Completed,
    /// Cancelled by an admin.
    #[serde(rename = "cancelled", alias = "Cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// The exact string the backend stores for this status.
    #[must_use]
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether admin actions (complete / cancel) apply to this status.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Role of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum UserRole {
    /// Can reach the admin panel.
    Admin,
    /// Regular customer. Unknown roles degrade to this.
    #[default]
    User,
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

/// How the customer chose to pay at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit/debit card collected by the checkout form. The payment
    /// page's preselected method.
    #[default]
    Card,
    /// UPI via the external payment gateway.
    Upi,
    /// Cash on delivery.
    Cod,
}
