use ethers::types::Address;
use quickstart_contracts::ContractError;
use quickstart_primitives::authorization::AuthorizationError;
use thiserror::Error;

/// Errors of the smart account
#[derive(Debug, Error)]
pub enum AccountError {
    /// Nothing to execute
    #[error("at least one call is required")]
    NoCalls,

    /// Call to the entry point or the factory failed
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Plain node request failed
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },

    /// The owner key could not sign
    #[error("signer error: {inner}")]
    Signer {
        /// The inner error message
        inner: String,
    },

    /// EIP-7702 authorization not signed by the owner
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// EIP-7702 authorization delegating to another implementation
    #[error("authorization delegates to {found:?}, expected {expected:?}")]
    WrongDelegate { found: Address, expected: Address },
}

impl AccountError {
    pub(crate) fn provider<E: ToString>(err: E) -> Self {
        Self::Provider { inner: err.to_string() }
    }

    pub(crate) fn signer<E: ToString>(err: E) -> Self {
        Self::Signer { inner: err.to_string() }
    }
}
