//! Session-scoped application state.
//!
//! The original client kept the current user and cart in a process-wide
//! context; here the same lifecycle lives in an explicitly passed
//! [`SessionContext`]: created empty at session start, handed by reference
//! to every consumer, reset at logout. It is read and written only from the
//! single UI event loop, so there is no locking.

use secrecy::SecretString;

use dessert_lab_core::{Cart, User, UserRole};

use crate::api::types::LoginResponse;

/// A navigation target a flow hands to the routing collaborator.
///
/// This crate does not own routing; flows return one of these and the
/// embedding application decides what "go there" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// The landing page.
    Home,
    /// The product catalog.
    Products,
    /// The cart page.
    Cart,
    /// The login page.
    Login,
    /// The checkout/payment page.
    Payment,
    /// The customer's order history.
    Orders,
}

impl NavigationIntent {
    /// The route path this intent maps to.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Products => "/products",
            Self::Cart => "/cart",
            Self::Login => "/login",
            Self::Payment => "/payment",
            Self::Orders => "/order",
        }
    }
}

/// The logged-in user plus their bearer token.
///
/// The token is held as a [`SecretString`] so it never leaks through
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The user record returned at login.
    pub user: User,
    /// Bearer token for authenticated calls.
    pub token: SecretString,
}

impl CurrentUser {
    /// Whether this user may reach the admin panel.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.role == UserRole::Admin
    }
}

impl From<LoginResponse> for CurrentUser {
    fn from(response: LoginResponse) -> Self {
        Self {
            user: response.user,
            token: SecretString::from(response.token),
        }
    }
}

/// Per-session state: the current user (if any) and the cart.
#[derive(Debug, Default)]
pub struct SessionContext {
    user: Option<CurrentUser>,
    cart: Cart,
}

impl SessionContext {
    /// Create a fresh, anonymous session with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful login.
    pub fn login(&mut self, response: LoginResponse) {
        tracing::info!(user = %response.user.email, "Session authenticated");
        self.user = Some(CurrentUser::from(response));
    }

    /// Tear the session down: drop the user and reset the cart.
    pub fn logout(&mut self) {
        tracing::info!("Session reset");
        self.user = None;
        self.cart.clear();
    }

    /// The current user, when authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Read access to the cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access to the cart (catalog and cart views mutate through
    /// this; dependent views re-derive pricing afterwards).
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }
}
