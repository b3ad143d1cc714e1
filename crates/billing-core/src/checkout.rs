//! # Checkout State Machine
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────────────┐   proceed (cart not empty)   ┌───────────────┐   │
//! │   │     Browsing     │ ───────────────────────────► │    Active     │   │
//! │   │  confirmation:   │                              │  CheckoutForm │   │
//! │   │  Option<Receipt> │ ◄─────────── cancel ──────── │               │   │
//! │   └──────────────────┘                              └───────┬───────┘   │
//! │            ▲                                                │           │
//! │            │      pay (amount >= total)                     │           │
//! │            └── clears cart, keeps receipt ◄─────────────────┤           │
//! │                                                             │           │
//! │                   pay (amount < total) ─────► stays Active, │           │
//! │                                               last_error set┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transitions here only touch checkout state. Clearing the cart and
//! building the receipt is done by the storefront, which owns the cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, PaymentReceipt};

/// Why the last payment on the form was refused.
///
/// Kept as amounts rather than text so the screen can print them with
/// whatever currency symbol the counter is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentShortfall {
    pub required: Money,
    pub offered: Money,
}

impl PaymentShortfall {
    /// The inline message, with amounts in `symbol`.
    ///
    /// ```rust
    /// use billing_core::{Money, PaymentShortfall};
    ///
    /// let shortfall = PaymentShortfall {
    ///     required: Money::from_rupees(30),
    ///     offered: Money::from_rupees(10),
    /// };
    /// assert_eq!(shortfall.message("Rs."), "Payment amount should be at least Rs.30");
    /// ```
    pub fn message(&self, symbol: &str) -> String {
        format!(
            "Payment amount should be at least {}",
            self.required.format_with(symbol)
        )
    }
}

impl From<PaymentShortfall> for CoreError {
    fn from(shortfall: PaymentShortfall) -> Self {
        CoreError::InsufficientPayment {
            required: shortfall.required,
            offered: shortfall.offered,
        }
    }
}

/// Inputs and inline error of an open checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutForm {
    pub method: PaymentMethod,
    /// `None` while the amount field is empty.
    pub amount_entered: Option<Money>,
    pub last_error: Option<PaymentShortfall>,
}

/// Where the counter is in the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    /// No checkout open. Holds the last payment confirmation, if any.
    Browsing { confirmation: Option<PaymentReceipt> },
    /// Checkout form is open.
    Active(CheckoutForm),
}

impl Default for CheckoutState {
    fn default() -> Self {
        CheckoutState::Browsing { confirmation: None }
    }
}

impl CheckoutState {
    pub fn is_active(&self) -> bool {
        matches!(self, CheckoutState::Active(_))
    }

    /// Name of the state for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            CheckoutState::Browsing { .. } => "browsing",
            CheckoutState::Active(_) => "checkout is open",
        }
    }

    /// The open form, if any.
    pub fn form(&self) -> Option<&CheckoutForm> {
        match self {
            CheckoutState::Active(form) => Some(form),
            CheckoutState::Browsing { .. } => None,
        }
    }

    /// The last successful payment, while browsing.
    pub fn confirmation(&self) -> Option<&PaymentReceipt> {
        match self {
            CheckoutState::Browsing { confirmation } => confirmation.as_ref(),
            CheckoutState::Active(_) => None,
        }
    }

    /// Browsing → Active with a fresh form.
    ///
    /// The caller checks that the cart is not empty.
    pub fn open(&mut self) -> CoreResult<()> {
        if self.is_active() {
            return Err(self.invalid("proceed to checkout"));
        }
        *self = CheckoutState::Active(CheckoutForm::default());
        Ok(())
    }

    /// Active → Browsing without touching the cart.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if !self.is_active() {
            return Err(self.invalid("cancel checkout"));
        }
        *self = CheckoutState::Browsing { confirmation: None };
        Ok(())
    }

    /// Records the submitted inputs and checks them against the total.
    ///
    /// An empty amount counts as zero. On shortfall the form keeps the
    /// inputs and shows the error inline; the state stays Active.
    pub fn validate_payment(
        &mut self,
        amount_entered: Option<Money>,
        method: PaymentMethod,
        total: Money,
    ) -> CoreResult<Money> {
        let rejected = self.invalid("submit payment");
        let form = match self {
            CheckoutState::Active(form) => form,
            CheckoutState::Browsing { .. } => return Err(rejected),
        };

        form.method = method;
        form.amount_entered = amount_entered;

        let offered = amount_entered.unwrap_or_default();
        if offered < total {
            let shortfall = PaymentShortfall {
                required: total,
                offered,
            };
            form.last_error = Some(shortfall);
            return Err(shortfall.into());
        }

        form.last_error = None;
        Ok(offered)
    }

    /// Active → Browsing, keeping the receipt on screen.
    pub fn complete(&mut self, receipt: PaymentReceipt) {
        *self = CheckoutState::Browsing {
            confirmation: Some(receipt),
        };
    }

    /// Flat record for rendering.
    pub fn view(&self) -> CheckoutView {
        match self {
            CheckoutState::Browsing { confirmation } => CheckoutView {
                active: false,
                method: PaymentMethod::default(),
                amount_entered: None,
                last_error: None,
                succeeded: confirmation.is_some(),
            },
            CheckoutState::Active(form) => CheckoutView {
                active: true,
                method: form.method,
                amount_entered: form.amount_entered,
                last_error: form.last_error,
                succeeded: false,
            },
        }
    }

    fn invalid(&self, action: &'static str) -> CoreError {
        CoreError::InvalidTransition {
            action,
            state: self.describe(),
        }
    }
}

/// Flattened checkout state as the screen shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutView {
    pub active: bool,
    pub method: PaymentMethod,
    pub amount_entered: Option<Money>,
    pub last_error: Option<PaymentShortfall>,
    pub succeeded: bool,
}
