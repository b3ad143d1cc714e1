//! # Cart Commands
//!
//! Commands for the catalog quantities and the cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│   Paid   │       │
//! │  │  Cart    │     │          │     │  (frozen)│     │  (empty) │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   qty / add         pay / cancel                       │
//! │                   remove            (checkout.rs)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use billing_core::ProductId;
use tracing::debug;

use super::Outcome;
use crate::error::ApiError;
use crate::state::CounterState;

/// Sets the quantity typed next to a catalog row.
///
/// The value is already coerced by the parser; the storefront clamps it
/// to at least 1 again.
pub fn set_quantity(
    state: &mut CounterState,
    product_id: ProductId,
    quantity: i64,
) -> Result<Outcome, ApiError> {
    let quantity = state
        .store_mut()
        .set_pending_quantity(product_id, quantity)?;

    debug!(%product_id, quantity, "Pending quantity set");
    Ok(Outcome::QuantitySet {
        product_id,
        quantity,
    })
}

/// Adds the pending quantity of a product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases
/// - Not in cart: appended as a new line
/// - The pending quantity goes back to 1
pub fn add(state: &mut CounterState, product_id: ProductId) -> Result<Outcome, ApiError> {
    let store = state.store_mut();
    let added = store.pending_quantity(product_id);
    let line = store.add_to_cart(product_id)?;

    debug!(%product_id, added, in_cart = line.quantity, "Added to cart");
    Ok(Outcome::Added {
        product_id,
        name: line.name.clone(),
        added,
        in_cart: line.quantity,
    })
}

/// Removes a product's line. Removing something not in the cart is fine.
pub fn remove(state: &mut CounterState, product_id: ProductId) -> Result<Outcome, ApiError> {
    let removed = state.store_mut().remove_from_cart(product_id)?;

    debug!(%product_id, removed = removed.is_some(), "Remove from cart");
    Ok(Outcome::Removed {
        product_id,
        name: removed.map(|line| line.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session;
    use crate::error::ErrorCode;
    use crate::state::AppConfig;
    use billing_core::Money;

    fn signed_in() -> CounterState {
        let mut state = CounterState::new(AppConfig::default());
        session::login(&mut state, "Asha".into(), "password".into()).unwrap();
        state
    }

    #[test]
    fn test_add_uses_pending_quantity() {
        let mut state = signed_in();
        set_quantity(&mut state, ProductId(1), 2).unwrap();

        let outcome = add(&mut state, ProductId(1)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Added {
                product_id: ProductId(1),
                name: "Milk (1 litre)".to_string(),
                added: 2,
                in_cart: 2,
            }
        );

        let outcome = add(&mut state, ProductId(1)).unwrap();
        assert!(matches!(outcome, Outcome::Added { added: 1, in_cart: 3, .. }));
        assert_eq!(state.store().total(), Money::from_rupees(150));
    }

    #[test]
    fn test_remove() {
        let mut state = signed_in();
        add(&mut state, ProductId(2)).unwrap();

        let outcome = remove(&mut state, ProductId(9)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Removed {
                product_id: ProductId(9),
                name: None
            }
        );

        let outcome = remove(&mut state, ProductId(2)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Removed {
                product_id: ProductId(2),
                name: Some("Bread".to_string())
            }
        );
        assert!(state.store().cart().is_empty());
    }

    #[test]
    fn test_errors_are_mapped() {
        let mut state = CounterState::new(AppConfig::default());
        assert_eq!(
            add(&mut state, ProductId(1)).unwrap_err().code,
            ErrorCode::NotSignedIn
        );

        let mut state = signed_in();
        assert_eq!(
            add(&mut state, ProductId(77)).unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
