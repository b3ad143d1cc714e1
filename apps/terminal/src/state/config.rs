//! # Terminal Configuration
//!
//! Configuration loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BILLING_STORE_NAME="Corner Shop"                                   │
//! │     BILLING_DEMO_PASSWORD=s3cret                                       │
//! │     BILLING_OUTPUT=json                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $BILLING_CONFIG, or the platform config dir:                       │
//! │     ~/.config/billing/billing.toml (Linux)                             │
//! │     ~/Library/Application Support/com.billing.counter/billing.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Vijayalakshmi Traders"
//! currency_symbol = "₹"
//!
//! [auth]
//! demo_password = "password"
//!
//! [terminal]
//! output = "text"   # text | json
//! prompt = "> "
//! ```

use std::path::{Path, PathBuf};

use billing_core::{Money, DEFAULT_STORE_NAME, DEMO_PASSWORD};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BILLING_CONFIG";

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Output Mode
// =============================================================================

/// How responses are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Human-readable screens.
    #[default]
    Text,
    /// One JSON object per command.
    Json,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Text => write!(f, "text"),
            OutputMode::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            other => Err(ConfigError::Invalid(format!(
                "Unknown output mode: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Shop details shown on screens and receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Login settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Password every username shares at this counter.
    #[serde(default = "default_demo_password")]
    pub demo_password: String,
}

fn default_demo_password() -> String {
    DEMO_PASSWORD.to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            demo_password: default_demo_password(),
        }
    }
}

/// Terminal I/O settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSettings {
    #[serde(default)]
    pub output: OutputMode,

    /// Printed before each command in text mode.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_prompt() -> String {
    "> ".to_string()
}

impl Default for TerminalSettings {
    fn default() -> Self {
        TerminalSettings {
            output: OutputMode::default(),
            prompt: default_prompt(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete terminal configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub terminal: TerminalSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    ///
    /// A missing file means defaults. A file that exists but cannot be
    /// read, parsed or validated is an error, never a silent fallback to
    /// the demo password.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        if self.auth.demo_password.is_empty() {
            return Err(ConfigError::Invalid(
                "auth.demo_password must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// Takes the lookup as a closure so tests need not touch the real
    /// process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("BILLING_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(password) = lookup("BILLING_DEMO_PASSWORD") {
            debug!("Overriding demo password from environment");
            self.auth.demo_password = password;
        }

        if let Some(output) = lookup("BILLING_OUTPUT") {
            match output.parse() {
                Ok(mode) => self.terminal.output = mode,
                Err(_) => warn!(output = %output, "Unknown output mode in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "billing", "counter")
            .map(|dirs| dirs.config_dir().join("billing.toml"))
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_money(Money::from_paise(13050)), "₹130.50");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.store.currency_symbol)
    }
}
