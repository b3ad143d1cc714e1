//! # Error Types
//!
//! Domain-specific error types for billing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billing-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule and state machine failures       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  ├── ConfigError      - Config file / environment problems             │
//! │  └── ApiError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Notice on screen       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, required total, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every error is recoverable: the operator just tries again

use thiserror::Error;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Login rejected: empty username or wrong password.
    ///
    /// The login form keeps its contents so the operator can correct them.
    #[error("{reason}")]
    InvalidCredentials { reason: String },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty! Please add some products.")]
    EmptyCart,

    /// Amount tendered is below the cart total.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart total: ₹130
    ///      │
    ///      ▼
    /// Pay Now (amount: ₹100)
    ///      │
    ///      ▼
    /// InsufficientPayment { required: ₹130, offered: ₹100 }
    ///      │
    ///      ▼
    /// Checkout form shows: "Payment amount should be at least ₹130"
    /// ```
    #[error("Payment amount should be at least {required}")]
    InsufficientPayment { required: Money, offered: Money },

    /// Operation needs a logged-in customer.
    #[error("Please log in first")]
    NotSignedIn,

    /// The operation is not valid in the current state.
    ///
    /// ## When This Occurs
    /// - Paying or cancelling while no checkout is open
    /// - Proceeding to checkout while one is already open
    /// - Logging in while a customer is already logged in
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// Product id is not part of the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., "12abc" as an amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
