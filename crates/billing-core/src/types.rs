//! # Domain Types
//!
//! Core domain types used throughout the billing counter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │ PaymentReceipt  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │──►│  product_id     │──►│  receipt_id     │       │
//! │  │  name           │   │  name (frozen)  │   │  lines          │       │
//! │  │  price (Money)  │   │  unit_price     │   │  total, change  │       │
//! │  └─────────────────┘   │  quantity ≥ 1   │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Session      │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  username       │   │  Cash (default) │                             │
//! │  │  started_at     │   │  Card           │                             │
//! │  └─────────────────┘   │  Upi            │                             │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartLine` copies the product's name and price when it is first added,
//! so the cart and the receipt always show what the customer agreed to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// Catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ProductId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: format!("'{}' is not a product number", s.trim()),
            })
    }
}

/// A product on the shop shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,

    /// Display name shown on screen and on the receipt.
    pub name: String,

    /// Unit price.
    pub price: Money,
}

impl Product {
    /// Creates a product priced in whole rupees.
    pub fn new(id: u32, name: impl Into<String>, rupees: i64) -> Self {
        Product {
            id: ProductId(id),
            name: name.into(),
            price: Money::from_rupees(rupees),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
///
/// Recorded on the receipt only; validation is the same for every method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash at the counter.
    #[default]
    Cash,
    /// Card on the shop's terminal.
    Card,
    /// UPI transfer.
    Upi,
}

impl PaymentMethod {
    /// All methods, in the order the checkout form lists them.
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Upi];

    /// Human label for the checkout form.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Upi => write!(f, "upi"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: PaymentMethod::ALL.iter().map(|m| m.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product's aggregated quantity and price snapshot within the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Catalog product this line refers to.
    pub product_id: ProductId,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity, never below 1.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Line subtotal (unit price × quantity).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Session
// =============================================================================

/// A logged-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    /// Trimmed display name.
    pub username: String,

    /// When the customer logged in.
    #[ts(as = "String")]
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Session {
            username: username.into(),
            started_at: Utc::now(),
        }
    }
}

// =============================================================================
// Payment Receipt
// =============================================================================

/// Confirmation of a successful payment.
///
/// Stays visible after checkout closes until the next checkout or logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentReceipt {
    #[ts(as = "String")]
    pub receipt_id: Uuid,
    pub username: String,
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub tendered: Money,
    /// Tendered minus total; never negative.
    pub change: Money,
    pub method: PaymentMethod,
    #[ts(as = "String")]
    pub paid_at: DateTime<Utc>,
}

// =============================================================================
// Screen
// =============================================================================

/// Which screen the counter is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Nobody logged in; only the login form is shown.
    Login,
    /// Catalog and cart.
    Browsing,
    /// Checkout and payment form.
    Checkout,
}

// =============================================================================
// Unit Tests
// =============================================================================
