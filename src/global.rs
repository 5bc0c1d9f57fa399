//! Optional process-wide manager.
//!
//! Prefer passing an [`AddressValidatorManager`] explicitly. For hosts that want a
//! global, install it once at startup; it cannot be replaced afterwards.

use crate::errors::{Result, ValidatorError};
use crate::manager::AddressValidatorManager;
use std::sync::OnceLock;

static ADDRESS_VALIDATOR: OnceLock<AddressValidatorManager> = OnceLock::new();

/// Stores `manager` as the process-wide instance.
///
/// Fails with [`ValidatorError::Configuration`] if one is already installed.
pub fn install(manager: AddressValidatorManager) -> Result<&'static AddressValidatorManager> {
    let kind = manager.provider_kind();
    ADDRESS_VALIDATOR.set(manager).map_err(|_| {
        ValidatorError::Configuration("Address validator is already installed".to_string())
    })?;

    tracing::info!("Global address validator installed ({})", kind);
    address_validator().ok_or_else(|| {
        ValidatorError::Configuration("Address validator installation was lost".to_string())
    })
}

pub fn address_validator() -> Option<&'static AddressValidatorManager> {
    ADDRESS_VALIDATOR.get()
}

/// True when a manager is installed and bound to a real backend.
pub fn address_validator_available() -> bool {
    address_validator().is_some_and(AddressValidatorManager::is_available)
}
