//! Account abstraction (ERC-4337) primitive types
//!
//! This crate contains the entry point v0.7 user operation, EIP-7702 authorizations, the
//! bundler/paymaster wire types and the local signer used by the Kernel quickstart.

pub mod authorization;
pub mod chain;
pub mod constants;
pub mod paymaster;
pub mod provider;
mod user_operation;
pub mod utils;
mod wallet;

pub use authorization::{authorization_hash, Eip7702Auth};
pub use paymaster::{SponsorUserOperationRequest, SponsorUserOperationResult};
pub use user_operation::{
    GasPrice, UserOperationGasEstimation, UserOperationGasPrice, UserOperationHash,
    UserOperationReceipt, UserOperationRequest, UserOperationSigned,
};
pub use wallet::Wallet;
