//! Address validation backends.
//!
//! A backend only implements [`ProviderBackend::api_call`]. [`Provider`] wraps it with
//! the behavior every backend shares: rejecting addresses that compose to an empty
//! string and remembering the last result.

pub mod fake;
pub mod not_configured;
pub mod smarty_streets;

pub use fake::FakeProvider;
pub use not_configured::NotConfiguredProvider;
pub use smarty_streets::SmartyStreetsProvider;

use crate::errors::{Result, ValidatorError};
use crate::models::{Address, AddressResult};
use async_trait::async_trait;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// Which backend a [`Provider`] is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Fake,
    NotConfigured,
    SmartyStreets,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Fake => "fake",
            ProviderKind::NotConfigured => "not_configured",
            ProviderKind::SmartyStreets => "smarty_streets",
        };
        f.write_str(name)
    }
}

/// Backend-specific validation step.
///
/// Implementations receive addresses that are already known to be non-empty.
#[async_trait]
pub trait ProviderBackend: Send + Sync {
    async fn api_call(&self, address: &Address) -> Result<AddressResult>;

    fn kind(&self) -> ProviderKind;
}

/// A backend plus its last-response slot.
///
/// The slot is shared by every caller of the same instance: under concurrent use
/// `last_response` may return the result of an interleaved call. Callers that need
/// their own result should use the value returned by [`Provider::validate`].
pub struct Provider {
    backend: Box<dyn ProviderBackend>,
    last_response: Mutex<Option<AddressResult>>,
}

impl Provider {
    pub fn new<B>(backend: B) -> Self
    where
        B: ProviderBackend + 'static,
    {
        Self::from_boxed(Box::new(backend))
    }

    pub fn from_boxed(backend: Box<dyn ProviderBackend>) -> Self {
        Self {
            backend,
            last_response: Mutex::new(None),
        }
    }

    pub fn fake() -> Self {
        Self::new(FakeProvider)
    }

    pub fn not_configured() -> Self {
        Self::new(NotConfiguredProvider)
    }

    pub fn kind(&self) -> ProviderKind {
        self.backend.kind()
    }

    /// Validates `address` with the bound backend.
    ///
    /// Fails with [`ValidatorError::InvalidAddress`] before reaching the backend when
    /// the address composes to an empty string. Every result the backend produces,
    /// including error results, replaces the last response.
    pub async fn validate(&self, address: &Address) -> Result<AddressResult> {
        if address.address_as_string().is_empty() {
            return Err(ValidatorError::InvalidAddress(
                "Unable to validate an empty address".to_string(),
            ));
        }

        let result = self.backend.api_call(address).await?;
        *self.slot() = Some(result.clone());

        Ok(result)
    }

    /// Most recent result, or an empty one if nothing was validated yet.
    pub fn last_response(&self) -> AddressResult {
        self.slot().clone().unwrap_or_default()
    }

    pub fn last_response_as_string(&self) -> String {
        self.last_response().to_string()
    }

    fn slot(&self) -> MutexGuard<'_, Option<AddressResult>> {
        // The slot is only ever replaced whole, so a poisoned value is still consistent.
        self.last_response
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("kind", &self.kind())
            .finish()
    }
}
