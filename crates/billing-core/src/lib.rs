//! # billing-core: Pure Business Logic for the Billing Counter
//!
//! Everything the counter knows how to do, as plain data and functions with
//! zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Billing Counter Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal (apps/terminal)                     │   │
//! │  │    Login ──► Catalog + Cart ──► Checkout ──► Confirmation       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &mut Storefront                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ billing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │ catalog  │ │   cart   │ │    checkout      │  │   │
//! │  │   │  Money   │ │ Product  │ │ CartLine │ │  CheckoutState   │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────────────────────────┐   │   │
//! │  │   │   auth   │ │validation│ │  storefront (the controller) │   │   │
//! │  │   └──────────┘ └──────────┘ └──────────────────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO GLOBALS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Session, PaymentReceipt, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The fixed product list
//! - [`cart`] - Cart and pending quantities
//! - [`auth`] - Login form and credential verification
//! - [`checkout`] - Checkout state machine
//! - [`storefront`] - The controller that owns all of the above
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and coercion
//!
//! ## Example Usage
//!
//! ```rust
//! use billing_core::{LoginForm, SharedSecretVerifier, Storefront, CoreError};
//!
//! let mut store = Storefront::new(SharedSecretVerifier::new("password"));
//!
//! let err = store.login(&mut LoginForm::new("Asha", "wrong")).unwrap_err();
//! assert!(matches!(err, CoreError::InvalidCredentials { .. }));
//!
//! let session = store.login(&mut LoginForm::new("Asha", "password")).unwrap();
//! assert_eq!(session.username, "Asha");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod storefront;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{CredentialVerifier, LoginForm, SharedSecretVerifier};
pub use cart::{Cart, CartTotals, PendingQuantities};
pub use catalog::Catalog;
pub use checkout::{CheckoutForm, CheckoutState, CheckoutView, PaymentShortfall};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use storefront::Storefront;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest quantity a catalog row or cart line can hold.
///
/// Anything typed below this is raised to it. There is no maximum.
pub const MIN_ITEM_QUANTITY: i64 = 1;

/// Shop name printed on screens and receipts unless configured otherwise.
pub const DEFAULT_STORE_NAME: &str = "Vijayalakshmi Traders";

/// Shared password for the demo counter.
pub const DEMO_PASSWORD: &str = "password";
