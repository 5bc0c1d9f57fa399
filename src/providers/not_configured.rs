use super::{ProviderBackend, ProviderKind};
use crate::errors::{Result, ValidatorError};
use crate::models::{Address, AddressResult};
use async_trait::async_trait;

/// Fallback bound when no driver is selected or the selected one cannot be built.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotConfiguredProvider;

#[async_trait]
impl ProviderBackend for NotConfiguredProvider {
    async fn api_call(&self, _address: &Address) -> Result<AddressResult> {
        Err(ValidatorError::ProviderNotConfigured(
            "Address validator provider not configured. Check ADDRESS_VALIDATOR_DRIVER."
                .to_string(),
        ))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::NotConfigured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Provider;

    #[tokio::test]
    async fn test_always_fails_for_non_empty_address() {
        let provider = Provider::not_configured();

        for line in ["Test", "1 Main St, Madison, WI, 53703"] {
            let err = provider.validate(&Address::parse(line)).await.unwrap_err();
            assert!(matches!(err, ValidatorError::ProviderNotConfigured(_)));
        }
    }

    #[tokio::test]
    async fn test_empty_address_is_reported_first() {
        let err = Provider::not_configured()
            .validate(&Address::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidAddress(_)));
    }
}
