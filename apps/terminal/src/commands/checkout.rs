//! # Checkout Commands
//!
//! `checkout`, `pay` and `cancel`.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  > checkout          cart must not be empty                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  > pay 100 cash      100 < 130 ──► "Payment amount should be at        │
//! │         │                           least ₹130", checkout stays open   │
//! │         ▼                                                               │
//! │  > pay 130           130 >= 130 ──► receipt, cart emptied,             │
//! │                                     "Payment successful! ..."           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use billing_core::{Money, PaymentMethod};
use tracing::info;

use super::Outcome;
use crate::error::ApiError;
use crate::state::CounterState;

/// Opens checkout for the current cart.
pub fn proceed(state: &mut CounterState) -> Result<Outcome, ApiError> {
    let store = state.store_mut();
    store.proceed_to_checkout()?;

    let total = store.total();
    info!(%total, lines = store.cart().item_count(), "Checkout opened");
    Ok(Outcome::CheckoutOpened { total })
}

/// Takes payment.
///
/// Without an explicit method the one already selected on the form is
/// used (Cash for a fresh form).
pub fn pay(
    state: &mut CounterState,
    amount: Option<Money>,
    method: Option<PaymentMethod>,
) -> Result<Outcome, ApiError> {
    let symbol = state.config().store.currency_symbol.clone();
    let store = state.store_mut();
    let method = method.unwrap_or_else(|| {
        store
            .checkout()
            .form()
            .map(|form| form.method)
            .unwrap_or_default()
    });

    let receipt = store
        .submit_payment(amount, method)
        .map_err(|err| ApiError::from_core(err, &symbol))?;

    info!(
        receipt_id = %receipt.receipt_id,
        username = %receipt.username,
        total = %receipt.total,
        method = %receipt.method,
        "Payment accepted"
    );
    Ok(Outcome::Paid { receipt })
}

/// Closes checkout without paying. The cart is kept.
pub fn cancel(state: &mut CounterState) -> Result<Outcome, ApiError> {
    state.store_mut().cancel_checkout()?;
    info!("Checkout cancelled");
    Ok(Outcome::CheckoutCancelled)
}
