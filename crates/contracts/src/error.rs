use ethers::{
    abi::AbiDecode,
    providers::{Middleware, MiddlewareError},
    types::Bytes,
};
use thiserror::Error;

/// Errors of read-only contract calls made against the node
#[derive(Debug, Error, Clone)]
pub enum ContractError {
    /// execution reverted
    #[error("execution reverted: {0}")]
    ExecutionReverted(String),

    /// Provider error
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },

    /// ABI error
    #[error("abi error: {inner}")]
    ABI {
        /// The inner error message
        inner: String,
    },

    /// Data decoding error
    #[error("decode error: {inner}")]
    Decode {
        /// The inner error message
        inner: String,
    },

    /// Any other error
    #[error("other error: {inner}")]
    Other {
        /// The inner error message
        inner: String,
    },
}

impl<M: Middleware> From<ethers::contract::ContractError<M>> for ContractError {
    fn from(err: ethers::contract::ContractError<M>) -> Self {
        use ethers::contract::ContractError as Ethers;

        match err {
            Ethers::DecodingError(e) => Self::Decode { inner: e.to_string() },
            Ethers::DetokenizationError(e) => Self::Decode { inner: e.to_string() },
            Ethers::AbiError(e) => Self::ABI { inner: e.to_string() },
            Ethers::MiddlewareError { e } => match e.as_error_response() {
                Some(resp) => Self::from_revert_data(resp.as_revert_data(), resp.message.clone()),
                None => Self::Provider { inner: e.to_string() },
            },
            Ethers::ProviderError { e } => match e.as_error_response() {
                Some(resp) => Self::from_revert_data(resp.as_revert_data(), resp.message.clone()),
                None => Self::Provider { inner: e.to_string() },
            },
            Ethers::Revert(data) => Self::from_revert_data(Some(data), String::new()),
            _ => Self::Other { inner: err.to_string() },
        }
    }
}

impl ContractError {
    fn from_revert_data(data: Option<Bytes>, message: String) -> Self {
        match data {
            Some(data) => Self::ExecutionReverted(
                decode_revert_string(data.clone()).unwrap_or_else(|| data.to_string()),
            ),
            None => Self::Provider { inner: message },
        }
    }
}

// ethers-rs does not decode `require(cond, "reason")` / `revert("reason")` on its own: the revert
// data starts with the `Error(string)` selector `0x08c379a0`
pub fn decode_revert_string(data: Bytes) -> Option<String> {
    if data.len() < 4 {
        return None;
    }
    let (error_sig, reason) = data.split_at(4);
    if error_sig == [0x08, 0xc3, 0x79, 0xa0] {
        <String as AbiDecode>::decode(reason).ok()
    } else {
        None
    }
}
