//! # Counter State
//!
//! The storefront controller plus the configuration it was built from.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Counter State                                        │
//! │                                                                         │
//! │  run_session(&mut CounterState, stdin, stdout)                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │  Storefront<SharedSecret..>  │   │  AppConfig (read-only)       │   │
//! │  │  session, cart, pending,     │   │  store name, currency,       │   │
//! │  │  checkout                    │   │  output mode, prompt         │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  One command at a time: handlers borrow `&mut`, no locks needed.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use billing_core::{
    CartTotals, CheckoutView, Money, PaymentReceipt, ProductId, Screen, SharedSecretVerifier,
    Storefront,
};
use serde::Serialize;

use super::config::AppConfig;

/// The controller type the terminal drives.
pub type Counter = Storefront<SharedSecretVerifier>;

/// Everything a command handler can touch.
#[derive(Debug)]
pub struct CounterState {
    store: Counter,
    config: AppConfig,
}

impl CounterState {
    /// Builds a logged-out counter that accepts the configured password.
    pub fn new(config: AppConfig) -> Self {
        let verifier = SharedSecretVerifier::new(config.auth.demo_password.clone());
        CounterState {
            store: Storefront::new(verifier),
            config,
        }
    }

    pub fn store(&self) -> &Counter {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Counter {
        &mut self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Snapshot of what the screen shows right now.
    pub fn snapshot(&self) -> ScreenView {
        let store = &self.store;
        let screen = store.screen();

        let catalog = match screen {
            Screen::Browsing => store
                .catalog()
                .products()
                .iter()
                .map(|p| CatalogRow {
                    product_id: p.id,
                    name: p.name.clone(),
                    price: p.price,
                    pending_quantity: store.pending_quantity(p.id),
                })
                .collect(),
            Screen::Login | Screen::Checkout => Vec::new(),
        };

        let cart = store
            .cart()
            .lines()
            .iter()
            .map(|line| CartRow {
                product_id: line.product_id,
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                subtotal: line.subtotal(),
            })
            .collect();

        ScreenView {
            screen,
            store_name: self.config.store.name.clone(),
            username: store.session().map(|s| s.username.clone()),
            catalog,
            cart,
            totals: CartTotals::from(store.cart()),
            checkout: store.checkout_view(),
            confirmation: store.checkout().confirmation().cloned(),
        }
    }
}

/// A catalog row with the quantity typed next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRow {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub pending_quantity: i64,
}

/// A cart line with its subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRow {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Everything needed to draw the current screen.
///
/// The catalog is only filled while browsing. Amounts serialize as paise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub screen: Screen,
    pub store_name: String,
    pub username: Option<String>,
    pub catalog: Vec<CatalogRow>,
    pub cart: Vec<CartRow>,
    pub totals: CartTotals,
    pub checkout: CheckoutView,
    /// Last successful payment, shown until the next checkout or logout.
    pub confirmation: Option<PaymentReceipt>,
}
