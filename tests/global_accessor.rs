/// Tests for the process-wide accessor
/// Kept in its own test binary because the installed manager lives for the whole process
use address_validator::global::{address_validator, address_validator_available, install};
use address_validator::{Address, AddressValidatorManager, Provider, ValidatorError};

#[tokio::test]
async fn test_install_once_then_read() {
    assert!(address_validator().is_none());
    assert!(!address_validator_available());

    let installed = install(AddressValidatorManager::new(Provider::fake())).unwrap();
    assert!(installed.is_available());
    assert!(address_validator_available());

    let result = address_validator()
        .unwrap()
        .validate(&Address::parse("Test"))
        .await
        .unwrap();
    assert!(!result.is_error());

    let err = install(AddressValidatorManager::new(Provider::not_configured())).unwrap_err();
    assert!(matches!(err, ValidatorError::Configuration(_)));

    // The first manager stays bound
    assert!(address_validator_available());
    assert!(address_validator().unwrap().last_response().is_valid());
}
