//! The cart view: line totals, order value, and the checkout gate.
//!
//! Everything here is re-derived from the session cart on demand - cart
//! mutations invalidate nothing because nothing is cached.

use rust_decimal::Decimal;

use dessert_lab_core::Cart;

use crate::error::AppError;
use crate::session::{NavigationIntent, SessionContext};

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Selected quantity.
    pub qty: u32,
    /// Quantity x unit price.
    pub line_total: Decimal,
}

/// The rendered cart: rows plus the running order value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Rows in insertion order.
    pub lines: Vec<CartLineView>,
    /// Sum of all line totals (the cart page's "Order Value").
    pub order_value: Decimal,
}

impl CartSummary {
    /// Derive the summary from a cart snapshot.
    #[must_use]
    pub fn of(cart: &Cart) -> Self {
        let lines: Vec<CartLineView> = cart
            .lines()
            .map(|line| CartLineView {
                name: line.product.name.clone(),
                price: line.product.price.amount(),
                qty: line.qty,
                line_total: line.product.price.times(line.qty),
            })
            .collect();
        let order_value = lines.iter().map(|line| line.line_total).sum();
        Self { lines, order_value }
    }
}

/// The "Place Order" gate on the cart page.
///
/// Anonymous customers are sent to login; an empty cart blocks navigation
/// with a user-facing warning (no pricing breakdown is computed for it);
/// otherwise the customer proceeds to payment.
///
/// # Errors
///
/// [`AppError::EmptyCart`] when there is nothing to order.
pub fn begin_checkout(session: &SessionContext) -> Result<NavigationIntent, AppError> {
    if !session.is_authenticated() {
        return Ok(NavigationIntent::Login);
    }
    if session.cart().is_empty() {
        return Err(AppError::EmptyCart);
    }
    Ok(NavigationIntent::Payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dessert_lab_core::{Price, Product, ProductId};

    fn product(id: &str, name: &str, rupees: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Price::from_rupees(rupees),
            img_url: String::new(),
        }
    }

    fn login(session: &mut SessionContext) {
        session.login(
            serde_json::from_value(serde_json::json!({
                "_id": "u1",
                "firstname": "Jane",
                "lastname": "Doe",
                "email": "jane@example.com",
                "token": "t"
            }))
            .expect("valid login response"),
        );
    }

    #[test]
    fn test_summary_derives_totals() {
        let mut cart = Cart::new();
        cart.add(product("p1", "Mousse", 100));
        cart.increment(&ProductId::new("p1"));
        cart.add(product("p2", "Tart", 50));

        let summary = CartSummary::of(&cart);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.order_value, Decimal::from(250));
        assert_eq!(
            summary.lines.first().map(|l| l.line_total),
            Some(Decimal::from(200))
        );
    }

    #[test]
    fn test_summary_rederives_after_mutation() {
        let mut cart = Cart::new();
        cart.add(product("p1", "Mousse", 100));
        assert_eq!(CartSummary::of(&cart).order_value, Decimal::from(100));
        cart.decrement(&ProductId::new("p1"));
        assert_eq!(CartSummary::of(&cart).order_value, Decimal::ZERO);
    }

    #[test]
    fn test_anonymous_customer_goes_to_login() {
        let mut session = SessionContext::new();
        session.cart_mut().add(product("p1", "Mousse", 100));
        assert_eq!(
            begin_checkout(&session).expect("redirect"),
            NavigationIntent::Login
        );
    }

    #[test]
    fn test_empty_cart_blocks_checkout() {
        let mut session = SessionContext::new();
        login(&mut session);
        let err = begin_checkout(&session).expect_err("empty cart");
        assert!(matches!(err, AppError::EmptyCart));
        assert_eq!(
            err.user_message(),
            "Your cart is empty! Please add items before placing an order."
        );
    }

    #[test]
    fn test_ready_cart_goes_to_payment() {
        let mut session = SessionContext::new();
        login(&mut session);
        session.cart_mut().add(product("p1", "Mousse", 100));
        assert_eq!(
            begin_checkout(&session).expect("proceed"),
            NavigationIntent::Payment
        );
    }
}
