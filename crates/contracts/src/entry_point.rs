pub use super::gen::EntryPointAPI;
use crate::error::ContractError;
use ethers::{
    providers::Middleware,
    types::{Address, U256},
};
use std::sync::Arc;

/// Entry point v0.7 contract as seen by the account client
#[derive(Clone)]
pub struct EntryPoint<M: Middleware + 'static> {
    address: Address,
    entry_point_api: EntryPointAPI<M>,
}

impl<M: Middleware + 'static> EntryPoint<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        let entry_point_api = EntryPointAPI::new(address, eth_client);
        Self { address, entry_point_api }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Next nonce of `sender` in the 192-bit nonce space `key`
    pub async fn get_nonce(&self, sender: Address, key: U256) -> Result<U256, ContractError> {
        Ok(self.entry_point_api.get_nonce(sender, key).call().await?)
    }

    /// Deposit the account holds at the entry point
    pub async fn balance_of(&self, account: Address) -> Result<U256, ContractError> {
        Ok(self.entry_point_api.balance_of(account).call().await?)
    }
}
