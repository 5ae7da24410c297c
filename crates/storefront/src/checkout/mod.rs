//! The checkout/payment flow.
//!
//! From "cart confirmed" to "order placed or payment failed":
//!
//! ```text
//! idle -> validating -> processing -> { succeeded, failed }
//! ```
//!
//! `processing` is only reachable after field-level validation succeeds.
//! On success the cart is cleared and control is handed to the order
//! management collaborator via a navigation intent. Every failure is
//! recoverable: the error is surfaced as a human-readable message and the
//! flow returns to idle with the cart untouched.
//!
//! Three payment paths share the machine: card and cash-on-delivery post
//! the priced order directly; UPI first runs the gateway round trip
//! (create order, open widget, verify) in [`gateway`].

pub mod form;
pub mod gateway;
pub mod postal;

use tracing::{info, instrument};

use dessert_lab_core::{Cart, PaymentMethod, PricingBreakdown};

use crate::api::types::NewOrder;
use crate::api::BackendClient;
use crate::error::AppError;
use crate::session::{NavigationIntent, SessionContext};

use form::PaymentForm;
use gateway::{GatewayClient, GatewayNotes, PaymentWidget, WidgetEvent, WidgetPrefill};

/// Where the checkout flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// Interactive; accepting a payment attempt.
    #[default]
    Idle,
    /// Running field-level validation.
    Validating,
    /// Awaiting the backend (and, for UPI, the gateway).
    Processing,
    /// Order placed; cart cleared; control handed off.
    Succeeded,
    /// A step failed. Transient: the flow surfaces the error and returns
    /// to [`CheckoutState::Idle`].
    Failed,
}

/// How a UPI attempt resolved when it didn't error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Payment verified and order placed; navigate to order history.
    Placed(NavigationIntent),
    /// The customer dismissed the widget. Nothing charged, nothing
    /// mutated; the flow is idle again.
    Cancelled,
}

/// Drives one checkout attempt at a time over the session cart.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
    method: PaymentMethod,
    last_error: Option<String>,
}

impl CheckoutFlow {
    /// A fresh, idle flow with card preselected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    /// The selected payment method.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Select a payment method (the payment page's method toggle).
    pub fn select_method(&mut self, method: PaymentMethod) {
        self.method = method;
    }

    /// The most recently surfaced error message, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Pay by card: validate every field, then post the priced order.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] with the field errors; flow back at idle.
    /// - [`AppError::NotAuthenticated`] / [`AppError::EmptyCart`] when the
    ///   checkout gate was bypassed.
    /// - [`AppError::Backend`] when order placement fails; cart untouched.
    #[instrument(skip_all)]
    pub async fn pay_with_card(
        &mut self,
        session: &mut SessionContext,
        backend: &BackendClient,
        form: &PaymentForm,
    ) -> Result<NavigationIntent, AppError> {
        self.method = PaymentMethod::Card;
        self.last_error = None;
        self.state = CheckoutState::Validating;
        let errors = form.validate_card();
        if !errors.is_empty() {
            self.state = CheckoutState::Idle;
            return Err(AppError::Validation(errors));
        }
        self.place_order(session, backend).await
    }

    /// Pay cash on delivery: validate the contact fields, then post the
    /// priced order. The flat COD surcharge is part of the delivery fee
    /// policy, not an extra line.
    ///
    /// # Errors
    ///
    /// Same surface as [`CheckoutFlow::pay_with_card`].
    #[instrument(skip_all)]
    pub async fn pay_with_cod(
        &mut self,
        session: &mut SessionContext,
        backend: &BackendClient,
        form: &PaymentForm,
    ) -> Result<NavigationIntent, AppError> {
        self.method = PaymentMethod::Cod;
        self.last_error = None;
        self.state = CheckoutState::Validating;
        let errors = form.validate_contact();
        if !errors.is_empty() {
            self.state = CheckoutState::Idle;
            return Err(AppError::Validation(errors));
        }
        self.place_order(session, backend).await
    }

    /// Pay via UPI through the payment gateway.
    ///
    /// Runs the full round trip: create a gateway order for the rounded
    /// total, open the widget, verify the callback, then place the backend
    /// order. A dismissed widget resolves to
    /// [`CheckoutOutcome::Cancelled`] without an error.
    ///
    /// # Errors
    ///
    /// [`AppError::Gateway`] for any failed gateway step; the cart is
    /// never mutated on failure.
    #[instrument(skip_all)]
    pub async fn pay_with_upi<W: PaymentWidget>(
        &mut self,
        session: &mut SessionContext,
        backend: &BackendClient,
        gateway: &GatewayClient,
        widget: &W,
        form: &PaymentForm,
    ) -> Result<CheckoutOutcome, AppError> {
        self.method = PaymentMethod::Upi;
        self.last_error = None;
        let (user_id, user_email, user_name) = {
            let user = session
                .current_user()
                .ok_or(AppError::NotAuthenticated)?;
            (
                user.user.id.clone(),
                user.user.email.clone(),
                format!("{} {}", user.user.firstname, user.user.lastname),
            )
        };
        if session.cart().is_empty() {
            return Err(AppError::EmptyCart);
        }

        self.state = CheckoutState::Processing;
        let breakdown = PricingBreakdown::compute(session.cart()).rounded();

        let email = if form.email.trim().is_empty() {
            user_email.to_string()
        } else {
            form.email.trim().to_string()
        };
        let notes = GatewayNotes {
            email: email.clone(),
            items: items_summary(session.cart()),
        };
        let order = match gateway.create_order(breakdown.total, notes).await {
            Ok(order) => order,
            Err(e) => return Err(self.fail(e.into())),
        };

        let prefill = WidgetPrefill {
            name: if form.card_holder.trim().is_empty() {
                user_name
            } else {
                form.card_holder.clone()
            },
            email,
            contact: form.phone.clone(),
        };
        let options = GatewayClient::widget_options(&order, prefill, form.address.clone());

        match widget.open(options).await {
            WidgetEvent::Dismissed => {
                info!("Payment widget dismissed; checkout cancelled");
                self.state = CheckoutState::Idle;
                Ok(CheckoutOutcome::Cancelled)
            }
            WidgetEvent::Completed(callback) => {
                if let Err(e) = gateway.verify(&callback).await {
                    return Err(self.fail(e.into()));
                }
                let new_order = NewOrder {
                    user_id,
                    email: user_email,
                    order_value: breakdown.total,
                    items: session.cart().to_order_items(),
                };
                match backend.place_order(&new_order).await {
                    Ok(()) => {
                        self.state = CheckoutState::Succeeded;
                        session.cart_mut().clear();
                        info!(total = %breakdown.total, "Order placed via UPI");
                        Ok(CheckoutOutcome::Placed(NavigationIntent::Orders))
                    }
                    Err(e) => Err(self.fail(e.into())),
                }
            }
        }
    }

    /// Shared card/COD placement: compute the rounded breakdown, post the
    /// order, clear the cart on success.
    async fn place_order(
        &mut self,
        session: &mut SessionContext,
        backend: &BackendClient,
    ) -> Result<NavigationIntent, AppError> {
        let (user_id, email) = {
            let Some(user) = session.current_user() else {
                self.state = CheckoutState::Idle;
                return Err(AppError::NotAuthenticated);
            };
            (user.user.id.clone(), user.user.email.clone())
        };
        if session.cart().is_empty() {
            self.state = CheckoutState::Idle;
            return Err(AppError::EmptyCart);
        }

        self.state = CheckoutState::Processing;
        let breakdown = PricingBreakdown::compute(session.cart()).rounded();
        let order = NewOrder {
            user_id,
            email,
            order_value: breakdown.total,
            items: session.cart().to_order_items(),
        };

        match backend.place_order(&order).await {
            Ok(()) => {
                self.state = CheckoutState::Succeeded;
                session.cart_mut().clear();
                info!(total = %breakdown.total, "Order placed");
                Ok(NavigationIntent::Orders)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Record a failure: surface the message, return the flow to idle.
    fn fail(&mut self, err: AppError) -> AppError {
        self.state = CheckoutState::Failed;
        tracing::error!(error = %err, state = ?self.state, "Checkout failed");
        self.last_error = Some(err.user_message());
        // Failure is recoverable: the flow idles, ready for another attempt.
        self.state = CheckoutState::Idle;
        err
    }
}

/// Try to auto-fill city and state from the form's PIN code.
///
/// Fires only once the PIN has all six digits. Every outcome degrades
/// gracefully: success fills the fields, an unknown code or a lookup
/// failure leaves them for manual entry. The returned status string goes
/// under the PIN field; the form is never blocked.
pub async fn autofill_locality(
    form: &mut PaymentForm,
    postal: &postal::PostalClient,
) -> Option<String> {
    if form.zip_code.len() != 6 {
        return None;
    }
    match postal.lookup(&form.zip_code).await {
        Ok(Some(locality)) => {
            form.apply_locality(&locality);
            Some("Auto-filled city and state".to_string())
        }
        Ok(None) => {
            Some("Could not find location for this PIN. You can fill manually.".to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, "PIN lookup failed; falling back to manual entry");
            Some("Network error during PIN lookup. Please fill manually.".to_string())
        }
    }
}

/// Human-readable cart summary for gateway notes ("Moussex2, Tartx1").
fn items_summary(cart: &Cart) -> String {
    cart.lines()
        .map(|line| format!("{}x{}", line.product.name, line.qty))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dessert_lab_core::{Price, Product, ProductId};
    use url::Url;

    fn backend_at_dead_port() -> BackendClient {
        BackendClient::new(Url::parse("http://127.0.0.1:1").expect("valid url"))
    }

    fn gateway_at_dead_port() -> GatewayClient {
        GatewayClient::new(Url::parse("http://127.0.0.1:1").expect("valid url"))
    }

    fn authenticated_session_with_cart() -> SessionContext {
        let mut session = SessionContext::new();
        session.login(
            serde_json::from_value(serde_json::json!({
                "_id": "u1",
                "firstname": "Jane",
                "lastname": "Doe",
                "email": "jane@example.com",
                "role": "user",
                "token": "t0k3n"
            }))
            .expect("valid login response"),
        );
        session.cart_mut().add(Product {
            id: ProductId::new("p1"),
            name: "Mousse".to_string(),
            description: String::new(),
            price: Price::from_rupees(100),
            img_url: String::new(),
        });
        session
    }

    fn valid_form() -> PaymentForm {
        PaymentForm {
            card_number: "4111 1111 1111 1111".to_string(),
            card_holder: "Jane Doe".to_string(),
            expiry_date: "09/27".to_string(),
            cvv: "123".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            address: "12 Baker Street".to_string(),
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            zip_code: "400001".to_string(),
            country: "India".to_string(),
        }
    }

    #[test]
    fn test_card_is_the_preselected_method() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.method(), PaymentMethod::Card);
        flow.select_method(PaymentMethod::Upi);
        assert_eq!(flow.method(), PaymentMethod::Upi);
    }

    #[tokio::test]
    async fn test_validation_failure_blocks_processing() {
        let mut flow = CheckoutFlow::new();
        let mut session = authenticated_session_with_cart();
        let mut form = valid_form();
        form.card_number = "4111".to_string();

        let err = flow
            .pay_with_card(&mut session, &backend_at_dead_port(), &form)
            .await
            .expect_err("invalid card number");
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(flow.state(), CheckoutState::Idle);
        // Nothing was mutated
        assert!(!session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_is_recoverable_and_preserves_cart() {
        let mut flow = CheckoutFlow::new();
        let mut session = authenticated_session_with_cart();

        let err = flow
            .pay_with_card(&mut session, &backend_at_dead_port(), &valid_form())
            .await
            .expect_err("backend unreachable");
        assert!(matches!(err, AppError::Backend(_)));
        assert_eq!(flow.state(), CheckoutState::Idle);
        assert!(flow.last_error().is_some());
        assert!(!session.cart().is_empty(), "cart must survive a failure");
    }

    #[tokio::test]
    async fn test_anonymous_checkout_rejected() {
        let mut flow = CheckoutFlow::new();
        let mut session = SessionContext::new();

        let err = flow
            .pay_with_card(&mut session, &backend_at_dead_port(), &valid_form())
            .await
            .expect_err("not logged in");
        assert!(matches!(err, AppError::NotAuthenticated));
        assert_eq!(flow.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_upi_gateway_failure_never_mutates_cart() {
        let mut flow = CheckoutFlow::new();
        let mut session = authenticated_session_with_cart();

        struct NeverOpened;
        impl PaymentWidget for NeverOpened {
            async fn open(&self, _options: gateway::WidgetOptions) -> WidgetEvent {
                unreachable!("create_order fails before the widget opens")
            }
        }

        let err = flow
            .pay_with_upi(
                &mut session,
                &backend_at_dead_port(),
                &gateway_at_dead_port(),
                &NeverOpened,
                &valid_form(),
            )
            .await
            .expect_err("gateway unreachable");
        assert!(matches!(err, AppError::Gateway(_)));
        assert_eq!(flow.state(), CheckoutState::Idle);
        assert!(!session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_autofill_waits_for_six_digits() {
        let postal =
            postal::PostalClient::new(Url::parse("http://127.0.0.1:1").expect("valid url"));
        let mut form = valid_form();
        form.zip_code = "4000".to_string();
        // Too short: no lookup fires (the dead-port client would error).
        assert_eq!(autofill_locality(&mut form, &postal).await, None);
    }

    #[tokio::test]
    async fn test_autofill_degrades_to_manual_entry_on_network_failure() {
        let postal =
            postal::PostalClient::new(Url::parse("http://127.0.0.1:1").expect("valid url"));
        let mut form = valid_form();
        form.city.clear();
        form.state.clear();
        let status = autofill_locality(&mut form, &postal).await;
        assert_eq!(
            status.as_deref(),
            Some("Network error during PIN lookup. Please fill manually.")
        );
        // Fields are left for manual entry
        assert!(form.city.is_empty());
        assert!(form.state.is_empty());
    }

    #[test]
    fn test_items_summary_shape() {
        let mut session = authenticated_session_with_cart();
        session.cart_mut().add(Product {
            id: ProductId::new("p2"),
            name: "Tart".to_string(),
            description: String::new(),
            price: Price::from_rupees(50),
            img_url: String::new(),
        });
        session.cart_mut().increment(&ProductId::new("p1"));
        assert_eq!(items_summary(session.cart()), "Moussex2, Tartx1");
    }
}
