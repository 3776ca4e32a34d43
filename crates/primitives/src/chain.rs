//! Chain extensions
use crate::constants::supported_chains::NAMES;
use alloy_chains::{Chain, NamedChain};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("chain {0} is not supported, expected one of: {}", NAMES.join(", "))]
pub struct UnsupportedChain(pub String);

pub trait ChainExt {
    /// Public JSON-RPC endpoint of the chain (used when no node URL is given)
    fn public_rpc_url(&self) -> Result<&'static str, UnsupportedChain>;

    /// Base URL of the default block explorer
    fn explorer_url(&self) -> Result<&'static str, UnsupportedChain>;

    /// Explorer link to a transaction
    fn transaction_url(&self, hash: &str) -> Result<String, UnsupportedChain> {
        Ok(format!("{}/tx/{hash}", self.explorer_url()?))
    }

    /// Explorer link to a user operation
    fn user_operation_url(&self, hash: &str) -> Result<String, UnsupportedChain> {
        Ok(format!("{}/op/{hash}", self.explorer_url()?))
    }
}

impl ChainExt for Chain {
    fn public_rpc_url(&self) -> Result<&'static str, UnsupportedChain> {
        match self.named() {
            Some(NamedChain::Sepolia) => Ok("https://sepolia.drpc.org"),
            Some(NamedChain::BaseSepolia) => Ok("https://sepolia.base.org"),
            _ => Err(UnsupportedChain(self.to_string())),
        }
    }

    fn explorer_url(&self) -> Result<&'static str, UnsupportedChain> {
        match self.named() {
            Some(NamedChain::Sepolia) => Ok("https://sepolia.etherscan.io"),
            Some(NamedChain::BaseSepolia) => Ok("https://base-sepolia.blockscout.com"),
            _ => Err(UnsupportedChain(self.to_string())),
        }
    }
}

/// Parses one of the supported chain names (`sepolia`, `base-sepolia`)
pub fn parse_chain(name: &str) -> Result<Chain, UnsupportedChain> {
    NamedChain::from_str(name)
        .ok()
        .filter(|chain| crate::constants::supported_chains::CHAINS.contains(chain))
        .map(Chain::from)
        .ok_or_else(|| UnsupportedChain(name.into()))
}
