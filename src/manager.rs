use crate::config::{Config, SmartyStreetsConfig, FAKE_CLASS, SMARTY_STREETS_CLASS};
use crate::errors::Result;
use crate::models::{Address, AddressResult};
use crate::providers::{Provider, ProviderKind, SmartyStreetsProvider};

/// Entry point for address validation.
///
/// Bound to exactly one [`Provider`] for its whole life and forwards every call to it,
/// so callers never depend on a concrete backend.
#[derive(Debug)]
pub struct AddressValidatorManager {
    provider: Provider,
}

impl AddressValidatorManager {
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    /// Binds the provider selected by `config.driver`.
    ///
    /// A missing driver, an unknown implementation or a driver that cannot be built
    /// all fall back to the not-configured provider, so misconfiguration surfaces as
    /// [`crate::errors::ValidatorError::ProviderNotConfigured`] on the first call.
    pub fn from_config(config: &Config) -> Self {
        Self::new(resolve_provider(config))
    }

    pub async fn validate(&self, address: &Address) -> Result<AddressResult> {
        self.provider.validate(address).await
    }

    pub fn last_response(&self) -> AddressResult {
        self.provider.last_response()
    }

    pub fn last_response_as_string(&self) -> String {
        self.provider.last_response_as_string()
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    /// True when a real backend is bound.
    pub fn is_available(&self) -> bool {
        self.provider_kind() != ProviderKind::NotConfigured
    }
}

fn resolve_provider(config: &Config) -> Provider {
    let Some(name) = config.driver.as_deref() else {
        tracing::warn!("No address validator driver selected; validation is disabled");
        return Provider::not_configured();
    };

    let Some((_, driver)) = config.selected_driver() else {
        tracing::warn!("Address validator driver '{}' is not registered", name);
        return Provider::not_configured();
    };

    let provider = match driver.class.as_str() {
        FAKE_CLASS => Provider::fake(),
        SMARTY_STREETS_CLASS => {
            match SmartyStreetsConfig::try_from(driver)
                .and_then(|settings| SmartyStreetsProvider::new(&settings))
            {
                Ok(backend) => Provider::new(backend),
                Err(e) => {
                    tracing::error!("Failed to initialize driver '{}': {}", name, e);
                    return Provider::not_configured();
                }
            }
        }
        other => {
            tracing::warn!(
                "Driver '{}' names unknown implementation '{}'",
                name,
                other
            );
            return Provider::not_configured();
        }
    };

    tracing::info!(
        "✓ Address validator driver '{}' initialized ({})",
        name,
        provider.kind()
    );
    provider
}
