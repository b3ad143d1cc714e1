//! # Session Commands
//!
//! `login` and `logout`.

use billing_core::LoginForm;
use tracing::{debug, info};

use super::Outcome;
use crate::error::ApiError;
use crate::state::CounterState;

/// Logs a customer in.
///
/// The username is trimmed by the storefront. A blank username or a wrong
/// password leaves the counter on the login screen.
pub fn login(
    state: &mut CounterState,
    username: String,
    password: String,
) -> Result<Outcome, ApiError> {
    let mut form = LoginForm::new(username, password);
    let session = state.store_mut().login(&mut form)?;

    info!(username = %session.username, "Customer logged in");
    Ok(Outcome::LoggedIn {
        username: session.username.clone(),
    })
}

/// Logs out and resets the counter. Harmless when nobody is logged in.
pub fn logout(state: &mut CounterState) -> Outcome {
    let ended = state.store_mut().logout();

    match &ended {
        Some(session) => info!(username = %session.username, "Customer logged out"),
        None => debug!("Logout with no active session"),
    }

    Outcome::LoggedOut {
        username: ended.map(|s| s.username),
    }
}
