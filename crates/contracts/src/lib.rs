//! Bindings of the entry point v0.7 and Kernel v3.1 contracts

pub mod entry_point;
mod error;
mod gen;
pub mod kernel;

pub use entry_point::EntryPoint;
pub use error::{decode_revert_string, ContractError};
pub use gen::{factory_staker_api, kernel_api, FactoryStakerAPI, KernelAPI};
pub use kernel::KernelFactory;
