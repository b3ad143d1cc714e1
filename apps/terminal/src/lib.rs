//! # Billing Terminal Library
//!
//! The counter's front end: configuration, logging, and the command loop.
//! `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! billing_terminal_lib/
//! ├── lib.rs          ◄─── You are here (startup & session loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (TOML + env)
//! │   └── counter.rs  ◄─── Storefront + screen snapshot
//! ├── commands/
//! │   ├── mod.rs      ◄─── Parsing, dispatch, outcomes
//! │   ├── session.rs  ◄─── login / logout
//! │   ├── cart.rs     ◄─── qty / add / remove
//! │   └── checkout.rs ◄─── checkout / pay / cancel
//! ├── render.rs       ◄─── Text and JSON output
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Command, Outcome};
use error::ApiError;
use state::{AppConfig, CounterState, OutputMode, CONFIG_PATH_ENV};

/// Runs the counter on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,billing=debug; override with RUST_LOG               │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • $BILLING_CONFIG or platform config dir, then BILLING_* env vars   │
/// │     • No file means defaults; a broken file stops startup               │
/// │                                                                         │
/// │  3. Build Counter ────────────────────────────────────────────────────► │
/// │     • Logged out, empty cart, standard catalog                          │
/// │                                                                         │
/// │  4. Command Loop ─────────────────────────────────────────────────────► │
/// │     • One command per line until quit or end of input                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> io::Result<()> {
    init_tracing();

    info!("Starting billing counter");

    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let config = AppConfig::load(config_path).map_err(|err| {
        error!(%err, "Failed to load config");
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    info!(
        store = %config.store.name,
        output = %config.terminal.output,
        "Configuration loaded"
    );

    let mut state = CounterState::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut state, stdin.lock(), &mut stdout.lock())
}

/// Drives the counter from `input` until `quit` or end of input.
///
/// Every line is answered: a rejected command prints its error and the
/// loop carries on. Bytes that are not UTF-8 are replaced rather than
/// ending the session. In text mode the prompt is written before each read.
pub fn run_session<R, W>(
    state: &mut CounterState,
    mut input: R,
    output: &mut W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mode = state.config().terminal.output;

    if mode == OutputMode::Text {
        render::write_screen(output, state.config(), &state.snapshot())?;
        writeln!(output, "Type 'help' for a list of commands.")?;
    }

    let mut buf = Vec::new();
    loop {
        if mode == OutputMode::Text {
            write!(output, "{}", state.config().terminal.prompt)?;
            output.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            debug!("End of input");
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!("Input line is not valid UTF-8");
        }

        let result: Result<Outcome, ApiError> = match Command::parse(&line) {
            Ok(Some(command)) => commands::execute(state, command),
            Ok(None) => continue,
            Err(err) => Err(err),
        };

        render::write_response(output, state.config(), &result, &state.snapshot())?;
        output.flush()?;

        if matches!(result, Ok(Outcome::Quit)) {
            break;
        }
    }

    info!("Billing counter stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=billing=trace` - Show trace for billing crates only
/// - Default: `info,billing=debug`
///
/// Logs go to stderr so they never mix with the screens on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,billing=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(config: AppConfig, script: &str) -> String {
        let mut state = CounterState::new(config);
        let mut out = Vec::new();
        run_session(&mut state, Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_full_text_session() {
        let script = "\
login Asha wrong
login Asha password
qty 1 2
add 1
add 2
checkout
add 3
pay 100
pay 130
logout
quit
";
        let out = session(AppConfig::default(), script);

        assert!(out.contains("! Incorrect password"));
        assert!(out.contains("Welcome, Asha!"));
        assert!(out.contains("  Milk (1 litre) x 2  ₹100"));
        assert!(out.contains("  Bread x 1  ₹30"));
        assert!(out.contains("Checkout opened for ₹130"));
        assert!(out.contains("! Cannot add to cart while checkout is open"));
        assert!(out.contains("  Error: Payment amount should be at least ₹130"));
        assert!(out.contains(render::PAYMENT_SUCCESS));
        assert!(out.contains("Goodbye, Asha."));
        assert!(out.trim_end().ends_with("Goodbye!"));

        let after_payment = out
            .rsplit(render::PAYMENT_SUCCESS)
            .next()
            .unwrap_or_default();
        assert!(!after_payment.contains("Milk (1 litre) x 2"));
    }

    #[test]
    fn test_session_survives_bad_input() {
        let out = session(
            AppConfig::default(),
            "dance\n\nadd 1\nlogin Asha password\nadd 99\nremove\nqty 4 abc\n",
        );

        assert!(out.contains("! Unknown command: dance"));
        assert!(out.contains("! Please log in first"));
        assert!(out.contains("! Product not found: 99"));
        assert!(out.contains("! Usage: remove <product-id>"));
        assert!(out.contains("Quantity for [4] set to 1"));
    }

    #[test]
    fn test_session_survives_invalid_utf8() {
        let mut state = CounterState::new(AppConfig::default());
        let mut out = Vec::new();
        let script: &[u8] = b"login Asha password\nadd 1\n\xff\xfe\nadd 2\ncart\n";
        run_session(&mut state, script, &mut out).unwrap();

        assert_eq!(state.store().cart().item_count(), 2);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("! Unknown command: \u{fffd}\u{fffd}"));
        assert!(out.contains("  Bread x 1  ₹30"));
    }

    #[test]
    fn test_huge_quantity_saturates() {
        let mut state = CounterState::new(AppConfig::default());
        let mut out = Vec::new();
        let script = "login Asha password\nqty 1 99999999999999999999\nadd 1\n";
        run_session(&mut state, Cursor::new(script), &mut out).unwrap();

        let lines = state.store().cart().lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, i64::MAX);
    }

    #[test]
    fn test_end_of_input_stops_the_loop() {
        let out = session(AppConfig::default(), "login Asha password");
        assert!(out.contains("Welcome, Asha!"));
        assert!(!out.contains("Goodbye!"));
    }

    #[test]
    fn test_custom_store_and_prompt() {
        let mut config = AppConfig::default();
        config.store.name = "Corner Shop".to_string();
        config.terminal.prompt = "till$ ".to_string();

        let out = session(config, "help\n");
        assert!(out.starts_with("== Corner Shop ==\n"));
        assert!(out.contains("till$ Commands:"));
    }

    #[test]
    fn test_json_session() {
        let mut config = AppConfig::default();
        config.terminal.output = OutputMode::Json;

        let out = session(
            config,
            "login Asha password\nadd 2\ncheckout\npay 20 card\npay 30 card\n",
        );
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 5, "one JSON object per command, no prompt");
        assert_eq!(lines[2]["outcome"]["event"], "checkout_opened");
        assert_eq!(lines[2]["outcome"]["total"], 3000, "amounts are paise");
        assert_eq!(lines[3]["error"]["code"], "INSUFFICIENT_PAYMENT");
        assert_eq!(lines[3]["view"]["checkout"]["active"], true);
        assert_eq!(lines[3]["view"]["checkout"]["last_error"]["required"], 3000);
        assert_eq!(lines[4]["outcome"]["event"], "paid");
        assert_eq!(lines[4]["outcome"]["receipt"]["method"], "card");
        assert_eq!(lines[4]["view"]["screen"], "browsing");
        assert_eq!(lines[4]["view"]["checkout"]["succeeded"], true);
        assert!(lines[4]["view"]["cart"].as_array().unwrap().is_empty());
    }
}
