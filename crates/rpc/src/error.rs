use ethers::types::Address;
use quickstart_account::AccountError;
use quickstart_primitives::UserOperationHash;
use std::time::Duration;
use thiserror::Error;

/// Errors of the Kernel account client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Bundler request failed
    #[error("bundler error: {0}")]
    Bundler(jsonrpsee::core::ClientError),

    /// Paymaster request failed (e.g. sponsorship rejected)
    #[error("paymaster error: {0}")]
    Paymaster(jsonrpsee::core::ClientError),

    /// Node request failed
    #[error("node error: {inner}")]
    Node {
        /// The inner error message
        inner: String,
    },

    /// Account could not build or sign the user operation
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Sponsorship requested without a paymaster
    #[error("no paymaster configured")]
    NoPaymaster,

    /// Receipt not found in time
    #[error("user operation {hash} not included within {timeout:?}")]
    Timeout { hash: UserOperationHash, timeout: Duration },

    /// Bundler does not accept user operations for the account entry point
    #[error("entry point {0:?} not supported by the bundler")]
    UnsupportedEntryPoint(Address),

    /// Bundler serves another chain than the account
    #[error("bundler is on chain {bundler}, account on chain {account}")]
    ChainMismatch { bundler: u64, account: u64 },
}
