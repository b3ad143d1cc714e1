//! # Rendering
//!
//! Turns a command result plus the current screen into output.
//!
//! ## Text Screens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Login                     Browsing                    Checkout         │
//! │  ─────                     ────────                    ────────         │
//! │  == Store ==               == Store ==                 == Store ==      │
//! │  Please log in:            Welcome, Asha!              Welcome, Asha!   │
//! │    login <user> <pass>                                                  │
//! │                            Products:                   Cart:            │
//! │                              [1] Milk - ₹50  qty 2       Milk x 2  ₹100 │
//! │                              ...                                        │
//! │                            Cart:                       Checkout         │
//! │                              Milk x 2  ₹100              Total: ₹130    │
//! │                            Total: ₹130                   Method: Cash   │
//! │                                                          Error: ...     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! JSON mode writes one object per command:
//! `{"ok":true,"outcome":{...},"view":{...}}` or
//! `{"ok":false,"error":{...},"view":{...}}`.
//!
//! Every amount in JSON is an integer count of paise (`13000` is ₹130),
//! so readers never parse a currency symbol or a float.

use std::io::{self, Write};

use billing_core::{Money, Screen};
use serde::Serialize;

use crate::commands::Outcome;
use crate::error::{ApiError, ErrorCode};
use crate::state::{AppConfig, OutputMode, ScreenView};

/// Shown under the cart after a successful payment.
pub const PAYMENT_SUCCESS: &str = "Payment successful! Thank you for shopping.";

/// One JSON line.
#[derive(Debug, Serialize)]
struct Response<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ApiError>,
    view: &'a ScreenView,
}

/// Writes the response to one command in the configured mode.
pub fn write_response<W: Write>(
    out: &mut W,
    config: &AppConfig,
    result: &Result<Outcome, ApiError>,
    view: &ScreenView,
) -> io::Result<()> {
    match config.terminal.output {
        OutputMode::Json => write_json(out, result, view),
        OutputMode::Text => write_text(out, config, result, view),
    }
}

fn write_json<W: Write>(
    out: &mut W,
    result: &Result<Outcome, ApiError>,
    view: &ScreenView,
) -> io::Result<()> {
    let response = Response {
        ok: result.is_ok(),
        outcome: result.as_ref().ok(),
        error: result.as_ref().err(),
        view,
    };
    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)
}

fn write_text<W: Write>(
    out: &mut W,
    config: &AppConfig,
    result: &Result<Outcome, ApiError>,
    view: &ScreenView,
) -> io::Result<()> {
    match result {
        Ok(Outcome::Help { text }) => return writeln!(out, "{}", text),
        Ok(Outcome::Quit) => return writeln!(out, "Goodbye!"),
        Ok(outcome) => {
            if let Some(notice) = notice(config, outcome) {
                writeln!(out, "{}", notice)?;
            }
        }
        // The checkout section already shows payment errors inline.
        Err(err)
            if err.code == ErrorCode::InsufficientPayment
                && view.checkout.last_error.is_some() => {}
        Err(err) => writeln!(out, "! {}", err.message)?,
    }

    write_screen(out, config, view)
}

/// One-line summary of what a command did, if it needs one.
fn notice(config: &AppConfig, outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::LoggedOut {
            username: Some(username),
        } => Some(format!("Goodbye, {}.", username)),
        Outcome::QuantitySet {
            product_id,
            quantity,
        } => Some(format!("Quantity for [{}] set to {}", product_id, quantity)),
        Outcome::Added { name, added, .. } => Some(format!("Added {} x {}", added, name)),
        Outcome::Removed {
            name: Some(name), ..
        } => Some(format!("Removed {}", name)),
        Outcome::Removed { product_id, name: None } => {
            Some(format!("[{}] is not in the cart", product_id))
        }
        Outcome::CheckoutOpened { total } => {
            Some(format!("Checkout opened for {}", config.format_money(*total)))
        }
        Outcome::CheckoutCancelled => Some("Checkout cancelled".to_string()),
        Outcome::LoggedIn { .. }
        | Outcome::LoggedOut { username: None }
        | Outcome::Shown
        | Outcome::Paid { .. }
        | Outcome::Help { .. }
        | Outcome::Quit => None,
    }
}

/// Draws the current screen.
pub fn write_screen<W: Write>(out: &mut W, config: &AppConfig, view: &ScreenView) -> io::Result<()> {
    let money = |amount: Money| config.format_money(amount);

    writeln!(out, "== {} ==", view.store_name)?;

    let username = match (&view.screen, &view.username) {
        (Screen::Login, _) | (_, None) => {
            writeln!(out, "Please log in:")?;
            return writeln!(out, "  login <username> <password>");
        }
        (_, Some(username)) => username,
    };

    writeln!(out, "Welcome, {}!", username)?;

    if view.screen == Screen::Browsing {
        writeln!(out)?;
        writeln!(out, "Products:")?;
        for row in &view.catalog {
            writeln!(
                out,
                "  [{}] {} - {}  qty {}",
                row.product_id,
                row.name,
                money(row.price),
                row.pending_quantity
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Cart:")?;
    if view.cart.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for row in &view.cart {
        writeln!(out, "  {} x {}  {}", row.name, row.quantity, money(row.subtotal))?;
    }

    if view.checkout.active {
        writeln!(out)?;
        writeln!(out, "Checkout")?;
        writeln!(out, "  Total: {}", money(view.totals.total))?;
        writeln!(out, "  Method: {}", view.checkout.method.label())?;
        if let Some(amount) = view.checkout.amount_entered {
            writeln!(out, "  Amount paid: {}", money(amount))?;
        }
        if let Some(shortfall) = &view.checkout.last_error {
            writeln!(out, "  Error: {}", shortfall.message(&config.store.currency_symbol))?;
        }
        writeln!(out, "  pay <amount> [cash|card|upi]  |  cancel")?;
    } else {
        writeln!(out, "Total: {}", money(view.totals.total))?;
    }

    if let Some(receipt) = &view.confirmation {
        writeln!(out)?;
        writeln!(out, "{}", PAYMENT_SUCCESS)?;
        writeln!(
            out,
            "  Paid {} by {} for {}",
            money(receipt.tendered),
            receipt.method.label(),
            money(receipt.total)
        )?;
        if receipt.change.is_positive() {
            writeln!(out, "  Change due: {}", money(receipt.change))?;
        }
    }

    Ok(())
}
