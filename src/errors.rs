use std::fmt;

/// Result alias used by every validation entry point.
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Errors raised to the caller.
///
/// Transport and authentication failures of a remote backend are *not* part of
/// this taxonomy: they are reported through [`crate::models::AddressResult::is_error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    /// The address composes to an empty string, so there is nothing to validate.
    InvalidAddress(String),
    /// No usable backend is bound to the manager.
    ProviderNotConfigured(String),
    /// A driver entry or the global accessor was set up incorrectly.
    Configuration(String),
}

impl ValidatorError {
    /// Returns true for errors caused by the caller's input rather than by deployment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ValidatorError::InvalidAddress(_))
    }
}

impl fmt::Display for ValidatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            ValidatorError::ProviderNotConfigured(msg) => {
                write!(f, "Provider not configured: {}", msg)
            }
            ValidatorError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ValidatorError {}
