//! # Authentication
//!
//! Login form state and the pluggable credential check.
//!
//! The counter does not own user accounts. Whoever builds the
//! [`Storefront`](crate::storefront::Storefront) decides how passwords are
//! checked by handing it a [`CredentialVerifier`].

use serde::{Deserialize, Serialize};

/// Checks a username/password pair.
pub trait CredentialVerifier {
    /// Returns true when the credentials are accepted.
    ///
    /// `username` is already trimmed and non-empty.
    fn verify(&self, username: &str, password: &str) -> bool;
}

impl<F> CredentialVerifier for F
where
    F: Fn(&str, &str) -> bool,
{
    fn verify(&self, username: &str, password: &str) -> bool {
        self(username, password)
    }
}

/// Accepts any username with one shared password.
///
/// Suitable for a demo counter only.
#[derive(Debug, Clone)]
pub struct SharedSecretVerifier {
    secret: String,
}

impl SharedSecretVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        SharedSecretVerifier {
            secret: secret.into(),
        }
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    fn verify(&self, _username: &str, password: &str) -> bool {
        // Exact match: surrounding spaces are part of the password.
        password == self.secret
    }
}

/// The credential input fields.
///
/// Cleared after a successful login, kept as typed after a failed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        LoginForm {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_secret_verifier() {
        let verifier = SharedSecretVerifier::new("password");
        assert!(verifier.verify("Asha", "password"));
        assert!(!verifier.verify("Asha", "wrong"));
        assert!(!verifier.verify("Asha", "password "));
        assert!(!verifier.verify("Asha", ""));
    }

    #[test]
    fn test_closure_verifier() {
        let only_asha = |user: &str, pass: &str| user == "Asha" && pass == "letmein";
        assert!(only_asha.verify("Asha", "letmein"));
        assert!(!only_asha.verify("Ravi", "letmein"));
    }

    #[test]
    fn test_login_form_clear() {
        let mut form = LoginForm::new("Asha", "password");
        assert!(!form.is_empty());
        form.clear();
        assert!(form.is_empty());
    }

    #[test]
    fn test_login_form_never_serializes_password() {
        let form = LoginForm::new("Asha", "password");
        let json = serde_json::to_string(&form).unwrap();
        assert_eq!(json, r#"{"username":"Asha"}"#);
    }
}
