//! # Storefront
//!
//! The single controller that owns every piece of counter state. Its methods
//! are the only way to change that state.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────┐  login   ┌────────────────────────────┐                  │
//! │   │  Login  │ ───────► │          Browsing          │                  │
//! │   │ screen  │ ◄─────── │  catalog ──add──► cart     │                  │
//! │   └─────────┘  logout  └─────────────┬──────────────┘                  │
//! │        ▲                    proceed  │  ▲ cancel / paid                │
//! │        │                             ▼  │                              │
//! │        │ logout            ┌────────────────────────────┐              │
//! │        └────────────────── │          Checkout          │              │
//! │                            └────────────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use billing_core::{LoginForm, Money, PaymentMethod, ProductId, SharedSecretVerifier, Storefront};
//!
//! let mut store = Storefront::new(SharedSecretVerifier::new("password"));
//! store.login(&mut LoginForm::new("Asha", "password")).unwrap();
//!
//! store.set_pending_quantity(ProductId(1), 2).unwrap();
//! store.add_to_cart(ProductId(1)).unwrap();
//! store.add_to_cart(ProductId(2)).unwrap();
//! assert_eq!(store.total(), Money::from_rupees(130));
//!
//! store.proceed_to_checkout().unwrap();
//! assert!(store.submit_payment(Some(Money::from_rupees(100)), PaymentMethod::Cash).is_err());
//! let receipt = store.submit_payment(Some(Money::from_rupees(130)), PaymentMethod::Cash).unwrap();
//! assert_eq!(receipt.change, Money::zero());
//! assert!(store.cart().is_empty());
//! ```

use chrono::Utc;
use uuid::Uuid;

use crate::auth::{CredentialVerifier, LoginForm};
use crate::cart::{Cart, PendingQuantities};
use crate::catalog::Catalog;
use crate::checkout::{CheckoutState, CheckoutView};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, PaymentMethod, PaymentReceipt, Product, ProductId, Screen, Session};
use crate::validation::validate_username;

/// Notice shown when the username field is blank.
pub const MSG_USERNAME_REQUIRED: &str = "Please enter username";

/// Notice shown when the password is rejected.
pub const MSG_INCORRECT_PASSWORD: &str = "Incorrect password";

/// Billing counter controller.
#[derive(Debug)]
pub struct Storefront<V> {
    verifier: V,
    catalog: Catalog,
    session: Option<Session>,
    cart: Cart,
    pending: PendingQuantities,
    checkout: CheckoutState,
}

impl<V: CredentialVerifier> Storefront<V> {
    /// Creates a counter with the standard catalog.
    pub fn new(verifier: V) -> Self {
        Self::with_catalog(verifier, Catalog::standard())
    }

    /// Creates a counter with a custom catalog.
    pub fn with_catalog(verifier: V, catalog: Catalog) -> Self {
        Storefront {
            verifier,
            catalog,
            session: None,
            cart: Cart::new(),
            pending: PendingQuantities::new(),
            checkout: CheckoutState::default(),
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Logs a customer in.
    ///
    /// ## Behavior
    /// - Blank username → `InvalidCredentials`, form kept
    /// - Rejected password → `InvalidCredentials`, form kept
    /// - Success → session with the trimmed username, form cleared
    pub fn login(&mut self, form: &mut LoginForm) -> CoreResult<&Session> {
        if self.session.is_some() {
            return Err(CoreError::InvalidTransition {
                action: "log in",
                state: "already logged in",
            });
        }

        let username = validate_username(&form.username)
            .map_err(|_| CoreError::InvalidCredentials {
                reason: MSG_USERNAME_REQUIRED.to_string(),
            })?
            .to_string();

        if !self.verifier.verify(&username, &form.password) {
            return Err(CoreError::InvalidCredentials {
                reason: MSG_INCORRECT_PASSWORD.to_string(),
            });
        }

        form.clear();
        Ok(&*self.session.insert(Session::new(username)))
    }

    /// Logs out and resets the counter to its initial state.
    ///
    /// Returns the session that ended, if there was one.
    pub fn logout(&mut self) -> Option<Session> {
        self.cart.clear();
        self.pending.clear();
        self.checkout = CheckoutState::default();
        self.session.take()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// The screen the counter should be showing.
    pub fn screen(&self) -> Screen {
        match (&self.session, &self.checkout) {
            (None, _) => Screen::Login,
            (Some(_), CheckoutState::Active(_)) => Screen::Checkout,
            (Some(_), CheckoutState::Browsing { .. }) => Screen::Browsing,
        }
    }

    // =========================================================================
    // Catalog & Cart
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Pending quantity for a catalog row (1 when unset).
    pub fn pending_quantity(&self, product_id: ProductId) -> i64 {
        self.pending.get(product_id)
    }

    /// Sets the quantity typed next to a catalog row. Returns the clamped value.
    pub fn set_pending_quantity(&mut self, product_id: ProductId, quantity: i64) -> CoreResult<i64> {
        self.require_browsing("change quantity")?;
        self.product(product_id)?;
        Ok(self.pending.set(product_id, quantity))
    }

    /// Adds the pending quantity of a product to the cart.
    ///
    /// The pending quantity goes back to 1 afterwards.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> CoreResult<&CartLine> {
        self.require_browsing("add to cart")?;
        let product = self.product(product_id)?.clone();
        let quantity = self.pending.get(product_id);
        self.pending.reset(product_id);
        Ok(self.cart.add(&product, quantity))
    }

    /// Removes a product's line. Not being in the cart is fine.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> CoreResult<Option<CartLine>> {
        self.require_browsing("remove from cart")?;
        Ok(self.cart.remove(product_id))
    }

    /// Cart total.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    pub fn checkout(&self) -> &CheckoutState {
        &self.checkout
    }

    pub fn checkout_view(&self) -> CheckoutView {
        self.checkout.view()
    }

    /// Opens the checkout form.
    pub fn proceed_to_checkout(&mut self) -> CoreResult<()> {
        self.require_session()?;
        if self.checkout.is_active() {
            return self.checkout.open();
        }
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        self.checkout.open()
    }

    /// Takes payment for the cart.
    ///
    /// ## Behavior
    /// - Amount below total → `InsufficientPayment`, checkout stays open
    /// - Otherwise → receipt issued, cart and pending quantities emptied,
    ///   back to browsing with the receipt still on screen
    pub fn submit_payment(
        &mut self,
        amount_entered: Option<Money>,
        method: PaymentMethod,
    ) -> CoreResult<PaymentReceipt> {
        let username = self.require_session()?.username.clone();
        let total = self.cart.total();
        let tendered = self.checkout.validate_payment(amount_entered, method, total)?;

        let receipt = PaymentReceipt {
            receipt_id: Uuid::new_v4(),
            username,
            lines: self.cart.lines().to_vec(),
            total,
            tendered,
            change: tendered - total,
            method,
            paid_at: Utc::now(),
        };

        self.cart.clear();
        self.pending.clear();
        self.checkout.complete(receipt.clone());
        Ok(receipt)
    }

    /// Closes the checkout form without paying.
    pub fn cancel_checkout(&mut self) -> CoreResult<()> {
        self.require_session()?;
        self.checkout.cancel()
    }

    // =========================================================================
    // Guards
    // =========================================================================

    fn require_session(&self) -> CoreResult<&Session> {
        self.session.as_ref().ok_or(CoreError::NotSignedIn)
    }

    fn require_browsing(&self, action: &'static str) -> CoreResult<()> {
        self.require_session()?;
        if self.checkout.is_active() {
            return Err(CoreError::InvalidTransition {
                action,
                state: self.checkout.describe(),
            });
        }
        Ok(())
    }

    fn product(&self, product_id: ProductId) -> CoreResult<&Product> {
        self.catalog
            .get(product_id)
            .ok_or(CoreError::ProductNotFound(product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SharedSecretVerifier;

    fn store() -> Storefront<SharedSecretVerifier> {
        Storefront::new(SharedSecretVerifier::new("password"))
    }

    fn signed_in() -> Storefront<SharedSecretVerifier> {
        let mut store = store();
        store.login(&mut LoginForm::new("Asha", "password")).unwrap();
        store
    }

    /// Milk ×2 and Bread ×1 = ₹130.
    fn with_milk_and_bread() -> Storefront<SharedSecretVerifier> {
        let mut store = signed_in();
        store.set_pending_quantity(ProductId(1), 2).unwrap();
        store.add_to_cart(ProductId(1)).unwrap();
        store.add_to_cart(ProductId(2)).unwrap();
        store
    }

    // ---- session -----------------------------------------------------------

    #[test]
    fn test_login_success_trims_and_clears_form() {
        let mut store = store();
        let mut form = LoginForm::new("  Asha ", "password");

        let session = store.login(&mut form).unwrap();
        assert_eq!(session.username, "Asha");
        assert!(form.is_empty());
        assert_eq!(store.screen(), Screen::Browsing);
    }

    #[test]
    fn test_login_wrong_password_keeps_form() {
        let mut store = store();
        let mut form = LoginForm::new("Asha", "wrong");

        let err = store.login(&mut form).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidCredentials {
                reason: MSG_INCORRECT_PASSWORD.to_string()
            }
        );
        assert!(store.session().is_none());
        assert_eq!(form, LoginForm::new("Asha", "wrong"));
        assert_eq!(store.screen(), Screen::Login);
    }

    #[test]
    fn test_login_blank_username() {
        let mut store = store();
        let err = store.login(&mut LoginForm::new("   ", "password")).unwrap_err();
        assert_eq!(err.to_string(), MSG_USERNAME_REQUIRED);
        assert!(!store.is_signed_in());
    }

    #[test]
    fn test_login_twice_is_rejected() {
        let mut store = signed_in();
        let err = store
            .login(&mut LoginForm::new("Ravi", "password"))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(store.session().unwrap().username, "Asha");
    }

    #[test]
    fn test_operations_require_login() {
        let mut store = store();
        assert_eq!(store.add_to_cart(ProductId(1)).unwrap_err(), CoreError::NotSignedIn);
        assert_eq!(
            store.set_pending_quantity(ProductId(1), 3).unwrap_err(),
            CoreError::NotSignedIn
        );
        assert_eq!(store.remove_from_cart(ProductId(1)).unwrap_err(), CoreError::NotSignedIn);
        assert_eq!(store.proceed_to_checkout().unwrap_err(), CoreError::NotSignedIn);
        assert_eq!(
            store.submit_payment(None, PaymentMethod::Cash).unwrap_err(),
            CoreError::NotSignedIn
        );
        assert_eq!(store.cancel_checkout().unwrap_err(), CoreError::NotSignedIn);
    }

    #[test]
    fn test_custom_verifier() {
        let mut store = Storefront::new(|user: &str, pass: &str| user == "Asha" && pass == "s3cret");
        assert!(store.login(&mut LoginForm::new("Ravi", "s3cret")).is_err());
        assert!(store.login(&mut LoginForm::new("Asha", "s3cret")).is_ok());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = Catalog::new(vec![Product::new(7, "Salt", 20)]).unwrap();
        let mut store = Storefront::with_catalog(SharedSecretVerifier::new("password"), catalog);
        store.login(&mut LoginForm::new("Asha", "password")).unwrap();

        assert!(store.add_to_cart(ProductId(1)).is_err());
        store.add_to_cart(ProductId(7)).unwrap();
        assert_eq!(store.total(), Money::from_rupees(20));
    }

    #[test]
    fn test_logout_resets_everything() {
        let mut store = with_milk_and_bread();
        store.set_pending_quantity(ProductId(3), 5).unwrap();
        store.proceed_to_checkout().unwrap();

        let ended = store.logout().unwrap();
        assert_eq!(ended.username, "Asha");
        assert!(store.session().is_none());
        assert!(store.cart().is_empty());
        assert_eq!(store.pending_quantity(ProductId(3)), 1);
        assert!(!store.checkout_view().active);
        assert_eq!(store.screen(), Screen::Login);

        assert!(store.logout().is_none(), "logout when signed out is harmless");
    }

    // ---- cart --------------------------------------------------------------

    #[test]
    fn test_add_uses_and_resets_pending_quantity() {
        let mut store = signed_in();
        assert_eq!(store.set_pending_quantity(ProductId(5), 3).unwrap(), 3);

        let line = store.add_to_cart(ProductId(5)).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(store.pending_quantity(ProductId(5)), 1);

        let line = store.add_to_cart(ProductId(5)).unwrap();
        assert_eq!(line.quantity, 4);
        assert_eq!(store.cart().item_count(), 1);
    }

    #[test]
    fn test_pending_quantity_is_clamped_and_per_product() {
        let mut store = signed_in();
        assert_eq!(store.set_pending_quantity(ProductId(1), 0).unwrap(), 1);
        store.set_pending_quantity(ProductId(2), 7).unwrap();
        assert_eq!(store.pending_quantity(ProductId(1)), 1);
        assert_eq!(store.pending_quantity(ProductId(2)), 7);
        assert!(store.cart().is_empty(), "pending quantities never touch the cart");
    }

    #[test]
    fn test_unknown_product_is_rejected() {
        let mut store = signed_in();
        assert_eq!(
            store.add_to_cart(ProductId(99)).unwrap_err(),
            CoreError::ProductNotFound(ProductId(99))
        );
        assert!(store.set_pending_quantity(ProductId(0), 2).is_err());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = with_milk_and_bread();
        assert_eq!(store.remove_from_cart(ProductId(9)).unwrap(), None);
        assert_eq!(store.cart().item_count(), 2);

        let removed = store.remove_from_cart(ProductId(1)).unwrap().unwrap();
        assert_eq!(removed.quantity, 2);
        assert_eq!(store.total(), Money::from_rupees(30));
    }

    #[test]
    fn test_cart_is_frozen_during_checkout() {
        let mut store = with_milk_and_bread();
        store.proceed_to_checkout().unwrap();

        assert!(matches!(
            store.add_to_cart(ProductId(3)),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(store.remove_from_cart(ProductId(1)).is_err());
        assert_eq!(store.total(), Money::from_rupees(130));
    }

    // ---- checkout ----------------------------------------------------------

    #[test]
    fn test_checkout_empty_cart() {
        let mut store = signed_in();
        assert_eq!(store.proceed_to_checkout().unwrap_err(), CoreError::EmptyCart);
        assert_eq!(store.screen(), Screen::Browsing);
    }

    #[test]
    fn test_payment_scenario() {
        let mut store = with_milk_and_bread();
        assert_eq!(store.total(), Money::from_rupees(130));

        store.proceed_to_checkout().unwrap();
        assert_eq!(store.screen(), Screen::Checkout);

        let err = store
            .submit_payment(Some(Money::from_rupees(100)), PaymentMethod::Cash)
            .unwrap_err();
        assert!(err.to_string().contains("at least ₹130"));
        assert_eq!(store.cart().item_count(), 2);
        assert!(store.checkout_view().active);

        let receipt = store
            .submit_payment(Some(Money::from_rupees(130)), PaymentMethod::Card)
            .unwrap();
        assert_eq!(receipt.total, Money::from_rupees(130));
        assert_eq!(receipt.method, PaymentMethod::Card);
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.username, "Asha");

        assert!(store.cart().is_empty());
        let view = store.checkout_view();
        assert!(!view.active);
        assert!(view.succeeded);
        assert_eq!(store.screen(), Screen::Browsing);
        assert_eq!(store.checkout().confirmation(), Some(&receipt));
    }

    #[test]
    fn test_overpayment_gives_change() {
        let mut store = with_milk_and_bread();
        store.proceed_to_checkout().unwrap();
        let receipt = store
            .submit_payment(Some(Money::from_rupees(200)), PaymentMethod::Cash)
            .unwrap();
        assert_eq!(receipt.change, Money::from_rupees(70));
    }

    #[test]
    fn test_payment_clears_pending_quantities() {
        let mut store = with_milk_and_bread();
        store.set_pending_quantity(ProductId(4), 9).unwrap();
        store.proceed_to_checkout().unwrap();
        store
            .submit_payment(Some(Money::from_rupees(130)), PaymentMethod::Upi)
            .unwrap();
        assert_eq!(store.pending_quantity(ProductId(4)), 1);
    }

    #[test]
    fn test_cancel_keeps_cart() {
        let mut store = with_milk_and_bread();
        store.set_pending_quantity(ProductId(4), 9).unwrap();
        store.proceed_to_checkout().unwrap();
        store.cancel_checkout().unwrap();

        assert_eq!(store.screen(), Screen::Browsing);
        assert_eq!(store.total(), Money::from_rupees(130));
        assert_eq!(store.pending_quantity(ProductId(4)), 9);
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let mut store = with_milk_and_bread();
        assert!(matches!(
            store.submit_payment(Some(Money::from_rupees(500)), PaymentMethod::Cash),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            store.cancel_checkout(),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert_eq!(store.cart().item_count(), 2);

        store.proceed_to_checkout().unwrap();
        assert!(matches!(
            store.proceed_to_checkout(),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reopening_checkout_hides_old_confirmation() {
        let mut store = with_milk_and_bread();
        store.proceed_to_checkout().unwrap();
        store
            .submit_payment(Some(Money::from_rupees(130)), PaymentMethod::Cash)
            .unwrap();
        assert!(store.checkout_view().succeeded);

        store.add_to_cart(ProductId(2)).unwrap();
        assert!(store.checkout_view().succeeded, "confirmation survives browsing");

        store.proceed_to_checkout().unwrap();
        let view = store.checkout_view();
        assert!(!view.succeeded);
        assert_eq!(view.method, PaymentMethod::Cash);
        assert_eq!(view.amount_entered, None);
    }
}
