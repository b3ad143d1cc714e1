//! # API Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow at the Counter                            │
//! │                                                                         │
//! │  Operator                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  > pay 100                                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Handler                                                 │  │
//! │  │  Result<Outcome, ApiError>                                       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Parse Error? ──── UNKNOWN_COMMAND / VALIDATION_ERROR ──┐       │  │
//! │  │         │                                               │       │  │
//! │  │         ▼                                               ▼       │  │
//! │  │  Rule broken? ─── CoreError::InsufficientPayment ──── ApiError ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  ! Payment amount should be at least ₹130                              │
//! │  (or, in JSON mode)                                                     │
//! │  {"ok":false,"error":{"code":"INSUFFICIENT_PAYMENT","message":"..."}}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is shown as a notice and the loop carries on.

use billing_core::{CoreError, PaymentShortfall, ValidationError};
use serde::Serialize;

/// API error returned from command handlers.
///
/// ## Serialization
/// This is what JSON mode prints when a command fails:
/// ```json
/// {
///   "code": "EMPTY_CART",
///   "message": "Cart is empty! Please add some products."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Blank username or wrong password
    InvalidCredentials,

    /// Checkout requested with nothing in the cart
    EmptyCart,

    /// Amount paid is below the total
    InsufficientPayment,

    /// Command needs a logged-in customer
    NotSignedIn,

    /// Command not allowed in the current state
    InvalidTransition,

    /// Unknown product id
    NotFound,

    /// Malformed argument
    ValidationError,

    /// Unrecognised command keyword
    UnknownCommand,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unknown command error.
    pub fn unknown_command(keyword: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command: {}. Type 'help' for a list of commands.", keyword),
        )
    }

    /// Creates a usage error for a known command with bad arguments.
    pub fn usage(usage: &str) -> Self {
        ApiError::validation(format!("Usage: {}", usage))
    }

    /// Converts a core error, printing amounts with the counter's symbol.
    pub fn from_core(err: CoreError, currency_symbol: &str) -> Self {
        match err {
            CoreError::InsufficientPayment { required, offered } => ApiError::new(
                ErrorCode::InsufficientPayment,
                PaymentShortfall { required, offered }.message(currency_symbol),
            ),
            other => other.into(),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidCredentials { .. } => ErrorCode::InvalidCredentials,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::InsufficientPayment { .. } => ErrorCode::InsufficientPayment,
            CoreError::NotSignedIn => ErrorCode::NotSignedIn,
            CoreError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            CoreError::ProductNotFound(_) => ErrorCode::NotFound,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
