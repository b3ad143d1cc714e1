//! # Terminal Commands Module
//!
//! Parses operator input and dispatches it to the storefront.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (parsing, dispatch, outcomes)
//! ├── session.rs   ◄─── login, logout
//! ├── cart.rs      ◄─── qty, add, remove
//! └── checkout.rs  ◄─── checkout, pay, cancel
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin: "qty 1 2"                                                       │
//! │         │                                                               │
//! │         │ Command::parse                                                │
//! │         ▼                                                               │
//! │  Command::SetQuantity { product_id: 1, quantity: 2 }                    │
//! │         │                                                               │
//! │         │ execute(&mut CounterState, command)                           │
//! │         ▼                                                               │
//! │  cart::set_quantity ──► Storefront::set_pending_quantity                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<Outcome, ApiError> ──► render (text or JSON)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod session;

use billing_core::validation::{coerce_quantity, parse_amount};
use billing_core::{Money, PaymentMethod, PaymentReceipt, ProductId};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::CounterState;

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  login <username> <password>   Log in
  logout                        Log out and reset the counter
  catalog | products            Show products and cart
  cart                          Show products and cart
  qty <product-id> <value>      Set the quantity next to a product
  add <product-id>              Add that quantity to the cart
  remove <product-id>           Remove a product from the cart
  checkout                      Proceed to checkout
  pay <amount> [cash|card|upi]  Pay for the cart
  cancel                        Close checkout without paying
  help                          Show this help
  quit | exit                   Leave";

// =============================================================================
// Commands
// =============================================================================

/// One operator command.
#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Catalog,
    Cart,
    SetQuantity { product_id: ProductId, quantity: i64 },
    Add(ProductId),
    Remove(ProductId),
    Checkout,
    Pay {
        amount: Option<Money>,
        method: Option<PaymentMethod>,
    },
    Cancel,
    Help,
    Quit,
}

// Passwords stay out of logs.
impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Login { username, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .finish_non_exhaustive(),
            Command::SetQuantity {
                product_id,
                quantity,
            } => f
                .debug_struct("SetQuantity")
                .field("product_id", product_id)
                .field("quantity", quantity)
                .finish(),
            Command::Add(id) => f.debug_tuple("Add").field(id).finish(),
            Command::Remove(id) => f.debug_tuple("Remove").field(id).finish(),
            Command::Pay { amount, method } => f
                .debug_struct("Pay")
                .field("amount", amount)
                .field("method", method)
                .finish(),
            other => f.write_str(other.keyword()),
        }
    }
}

impl Command {
    /// Parses one input line.
    ///
    /// Blank lines give `Ok(None)`. Keywords are case-insensitive.
    pub fn parse(line: &str) -> Result<Option<Self>, ApiError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match keyword.to_lowercase().as_str() {
            "login" => Command::Login {
                username: args.first().copied().unwrap_or_default().to_string(),
                password: args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default(),
            },
            "logout" => Command::Logout,
            "catalog" | "products" => Command::Catalog,
            "cart" => Command::Cart,
            "qty" | "quantity" => {
                let product_id = product_arg(&args, "qty <product-id> <value>")?;
                let quantity = coerce_quantity(args.get(1).copied().unwrap_or_default());
                Command::SetQuantity {
                    product_id,
                    quantity,
                }
            }
            "add" => Command::Add(product_arg(&args, "add <product-id>")?),
            "remove" | "rm" => Command::Remove(product_arg(&args, "remove <product-id>")?),
            "checkout" => Command::Checkout,
            "pay" => parse_pay(&args)?,
            "cancel" => Command::Cancel,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ApiError::unknown_command(other)),
        };

        Ok(Some(command))
    }

    /// Canonical keyword, for logging.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Catalog => "catalog",
            Command::Cart => "cart",
            Command::SetQuantity { .. } => "qty",
            Command::Add(_) => "add",
            Command::Remove(_) => "remove",
            Command::Checkout => "checkout",
            Command::Pay { .. } => "pay",
            Command::Cancel => "cancel",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

fn product_arg(args: &[&str], usage: &str) -> Result<ProductId, ApiError> {
    let raw = args.first().ok_or_else(|| ApiError::usage(usage))?;
    Ok(raw.parse::<ProductId>()?)
}

/// `pay [amount] [method]`, in either order.
fn parse_pay(args: &[&str]) -> Result<Command, ApiError> {
    const USAGE: &str = "pay <amount> [cash|card|upi]";

    let mut amount_text: Option<&str> = None;
    let mut method = None;

    for &arg in args {
        if let Ok(parsed) = arg.parse::<PaymentMethod>() {
            if method.replace(parsed).is_some() {
                return Err(ApiError::usage(USAGE));
            }
        } else if amount_text.replace(arg).is_some() {
            return Err(ApiError::usage(USAGE));
        }
    }

    let amount = match amount_text {
        Some(text) => parse_amount(text)?,
        None => None,
    };

    Ok(Command::Pay { amount, method })
}

// =============================================================================
// Outcomes
// =============================================================================

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Outcome {
    LoggedIn {
        username: String,
    },
    LoggedOut {
        username: Option<String>,
    },
    Shown,
    QuantitySet {
        product_id: ProductId,
        quantity: i64,
    },
    Added {
        product_id: ProductId,
        name: String,
        added: i64,
        in_cart: i64,
    },
    Removed {
        product_id: ProductId,
        name: Option<String>,
    },
    CheckoutOpened {
        total: Money,
    },
    Paid {
        receipt: PaymentReceipt,
    },
    CheckoutCancelled,
    Help {
        text: String,
    },
    Quit,
}

/// Runs a parsed command against the counter.
pub fn execute(state: &mut CounterState, command: Command) -> Result<Outcome, ApiError> {
    debug!(command = command.keyword(), "Handling command");

    let result = match command {
        Command::Login { username, password } => session::login(state, username, password),
        Command::Logout => Ok(session::logout(state)),
        Command::Catalog | Command::Cart => Ok(Outcome::Shown),
        Command::SetQuantity {
            product_id,
            quantity,
        } => cart::set_quantity(state, product_id, quantity),
        Command::Add(product_id) => cart::add(state, product_id),
        Command::Remove(product_id) => cart::remove(state, product_id),
        Command::Checkout => checkout::proceed(state),
        Command::Pay { amount, method } => checkout::pay(state, amount, method),
        Command::Cancel => checkout::cancel(state),
        Command::Help => Ok(Outcome::Help {
            text: HELP.to_string(),
        }),
        Command::Quit => Ok(Outcome::Quit),
    };

    if let Err(err) = &result {
        debug!(code = ?err.code, message = %err.message, "Command rejected");
    }

    result
}
