use super::{ProviderBackend, ProviderKind};
use crate::errors::Result;
use crate::models::{Address, AddressResult};
use async_trait::async_trait;

/// Offline backend that echoes the input back as the only candidate.
///
/// The candidate is rebuilt from the composed string, so it goes through the same
/// `street, city, state, zip` tokenization as [`Address::parse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeProvider;

#[async_trait]
impl ProviderBackend for FakeProvider {
    async fn api_call(&self, address: &Address) -> Result<AddressResult> {
        let candidate = Address::parse(&address.address_as_string());
        tracing::debug!("Fake provider echoing {}", candidate);

        Ok(AddressResult::with_addresses(vec![candidate]))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Fake
    }
}
