//! # Billing Counter Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Billing Counter                                  │
//! │                                                                         │
//! │   stdin ──► commands/ ──► billing-core::Storefront ──► render ──► stdout│
//! │                                                                         │
//! │   tracing logs ──► stderr                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs so tests can drive the loop directly.

use std::process::ExitCode;

fn main() -> ExitCode {
    match billing_terminal_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("billing-terminal: {}", err);
            ExitCode::FAILURE
        }
    }
}
