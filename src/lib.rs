//! Address Validator Library
//!
//! Validates and normalizes postal addresses through a pluggable backend and returns
//! the same [`AddressResult`] whichever backend answered.
//!
//! # Modules
//!
//! - `config`: Driver registry and environment loading.
//! - `errors`: Errors raised to callers.
//! - `global`: Optional process-wide manager.
//! - `manager`: The validation façade bound to one provider.
//! - `models`: `Address` and `AddressResult`.
//! - `providers`: Backends (fake, not configured, SmartyStreets).

pub mod config;
pub mod errors;
pub mod global;
pub mod manager;
pub mod models;
pub mod providers;

pub use config::Config;
pub use errors::{Result, ValidatorError};
pub use manager::AddressValidatorManager;
pub use models::{Address, AddressResult};
pub use providers::{Provider, ProviderBackend, ProviderKind};
