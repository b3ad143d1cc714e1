//! # State Module
//!
//! Holds the counter for the lifetime of a terminal session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      run_session()                              │   │
//! │  │  let mut state = CounterState::new(config);                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │               ┌──────────────┴──────────────┐                          │
//! │               ▼                             ▼                           │
//! │  ┌──────────────────────┐       ┌──────────────────────┐               │
//! │  │   Storefront         │       │   AppConfig          │               │
//! │  │   (billing-core)     │       │   store / auth /     │               │
//! │  │   all counter state  │       │   terminal sections  │               │
//! │  └──────────────────────┘       └──────────────────────┘               │
//! │                                                                         │
//! │  No persistence: every run starts logged out with an empty cart.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod counter;

pub use config::{
    AppConfig, AuthSettings, ConfigError, ConfigResult, OutputMode, StoreSettings,
    TerminalSettings, CONFIG_PATH_ENV,
};
pub use counter::{CartRow, CatalogRow, Counter, CounterState, ScreenView};
