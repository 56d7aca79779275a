//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns: configuration, logging and wiring a
//! [`LockManager`](rdlock_application::LockManager) to the configured store.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Store resolution and lock manager construction |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`constants`] | Centralized configuration constants |

// Force-link rdlock-providers to ensure linkme registrations are included
extern crate rdlock_providers;

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{build_lock_manager, build_lock_store};
pub use config::{AppConfig, ConfigBuilder, ConfigLoader};
pub use error_ext::ErrorContext;
