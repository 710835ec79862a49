use thiserror::Error;

use crate::config::ConfigError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The customer's own home city must be a known reference city; a miss
    /// here is a configuration problem, not an empty result.
    #[error("customer home city `{city}` is not in the city reference table")]
    UnknownCustomerCity { city: String },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApplicationError {
    /// Stable machine-readable class for CLI outcome payloads.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::UnknownCustomerCity { .. }) => "unknown_customer_city",
            Self::Domain(DomainError::InvariantViolation(_)) => "domain_invariant",
            Self::Config(_) => "config_validation",
        }
    }
}
