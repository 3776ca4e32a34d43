//! Kernel v3.1 smart account
//!
//! The account is validated by the ECDSA validator installed as its root (sudo) validator. It
//! either lives at a counterfactual address deployed by the first user operation, or at the
//! address of an EOA delegated to the Kernel implementation with EIP-7702.

mod addresses;
mod call;
mod error;
mod kernel;
mod validator;

pub use addresses::{ACCOUNT_IMPLEMENTATION, ECDSA_VALIDATOR, ENTRY_POINT, FACTORY, META_FACTORY};
pub use call::{encode_calls, Call};
pub use error::AccountError;
pub use kernel::{delegation_target, sign_authorization, KernelAccount, SmartAccount};
pub use validator::EcdsaValidator;
