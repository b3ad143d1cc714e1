//! # Validation Module
//!
//! Input validation and coercion for the billing counter.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal (apps/terminal)                                     │
//! │  ├── Splits the command line into words                                │
//! │  └── Hands raw text to this module                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Quantity coercion (never below 1)                                 │
//! │  ├── Amount parsing (exact paise, no floats)                           │
//! │  └── Username trimming                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storefront state machine                                     │
//! │  └── Business rules (empty cart, insufficient payment, ...)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::num::IntErrorKind;

use crate::error::ValidationError;
use crate::money::{Money, PAISE_PER_RUPEE};
use crate::MIN_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a login username and returns it trimmed.
///
/// ## Example
/// ```rust
/// use billing_core::validation::validate_username;
///
/// assert_eq!(validate_username("  Asha ").unwrap(), "Asha");
/// assert!(validate_username("   ").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    Ok(username)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Clamps a pending quantity to the minimum of 1.
///
/// There is deliberately no upper bound.
#[inline]
pub fn clamp_quantity(qty: i64) -> i64 {
    qty.max(MIN_ITEM_QUANTITY)
}

/// Coerces the text of a quantity input to a usable quantity.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  "3"    → 3                                                             │
/// │  "0"    → 1   (clamped)                                                 │
/// │  "-4"   → 1   (clamped)                                                 │
/// │  "2.7"  → 2   (whole units only)                                        │
/// │  ""     → 1   (input cleared)                                           │
/// │  "abc"  → 1   (not a number)                                            │
/// │  "99999999999999999999" → i64::MAX (too many digits, saturates)        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn coerce_quantity(input: &str) -> i64 {
    let input = input.trim();

    let parsed = parse_whole(input).or_else(|| {
        input
            .split_once('.')
            .and_then(|(whole, _)| parse_whole(whole))
    });

    clamp_quantity(parsed.unwrap_or(MIN_ITEM_QUANTITY))
}

/// Parses an integer, saturating when it has too many digits for `i64`.
fn parse_whole(text: &str) -> Option<i64> {
    match text.parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Parses the "Amount Paid" input into an exact amount.
///
/// ## Rules
/// - Empty input means nothing was entered (`Ok(None)`)
/// - Up to two decimal places (`"130"`, `"130.5"`, `"130.50"`)
/// - An optional leading `₹` is accepted
/// - Negative amounts and anything non-numeric are rejected
///
/// ## Example
/// ```rust
/// use billing_core::money::Money;
/// use billing_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("130").unwrap(), Some(Money::from_rupees(130)));
/// assert_eq!(parse_amount("₹45.5").unwrap(), Some(Money::from_paise(4550)));
/// assert_eq!(parse_amount("").unwrap(), None);
/// assert!(parse_amount("12abc").is_err());
/// ```
pub fn parse_amount(input: &str) -> ValidationResult<Option<Money>> {
    let input = input.trim();
    let input = input.strip_prefix('₹').unwrap_or(input).trim();

    if input.is_empty() {
        return Ok(None);
    }

    if input.starts_with('-') {
        return Err(ValidationError::MustNotBeNegative {
            field: "amount".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: reason.to_string(),
    };

    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (input, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return Err(invalid("must be a number like 130 or 130.50"));
    }

    if fraction.len() > 2 {
        return Err(invalid("at most two decimal places"));
    }

    let rupees = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().map_err(|_| invalid("amount is too large"))?
    };

    let paise = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid("bad paise"))? * 10,
        _ => fraction.parse::<i64>().map_err(|_| invalid("bad paise"))?,
    };

    rupees
        .checked_mul(PAISE_PER_RUPEE)
        .and_then(|p| p.checked_add(paise))
        .map(|p| Some(Money::from_paise(p)))
        .ok_or_else(|| invalid("amount is too large"))
}

// =============================================================================
// Unit Tests
// =============================================================================
