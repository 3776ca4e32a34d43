//! JSON-RPC APIs of the ZeroDev bundler and paymaster, and the client sending user operations
//! from a Kernel account through them

mod bundler_api;
mod client;
mod error;
mod paymaster_api;

pub use bundler_api::{
    BundlerApiClient, BundlerApiServer, ZeroDevBundlerApiClient, ZeroDevBundlerApiServer,
};
pub use client::{build_http_client, GasPriceSource, KernelAccountClient};
pub use error::ClientError;
pub use paymaster_api::{PaymasterApiClient, PaymasterApiServer};
