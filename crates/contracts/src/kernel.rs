pub use super::gen::KernelFactoryAPI;
use crate::error::ContractError;
use ethers::{
    providers::Middleware,
    types::{Address, Bytes},
};
use std::sync::Arc;

/// Kernel account factory
///
/// Accounts are deployed through the meta factory, which forwards to this factory; the address
/// only depends on the initialization data and the salt.
#[derive(Clone)]
pub struct KernelFactory<M: Middleware + 'static> {
    address: Address,
    factory_api: KernelFactoryAPI<M>,
}

impl<M: Middleware + 'static> KernelFactory<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        Self { address, factory_api: KernelFactoryAPI::new(address, eth_client) }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Counterfactual address of the account created from `data` and `salt`
    pub async fn get_address(&self, data: Bytes, salt: [u8; 32]) -> Result<Address, ContractError> {
        Ok(self.factory_api.get_address(data, salt).call().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{abi::AbiEncode, providers::Provider};

    #[tokio::test]
    async fn get_address() {
        let account = Address::repeat_byte(0xaa);
        let (provider, mock) = Provider::mocked();
        mock.push::<Bytes, _>(Bytes::from(account.encode())).unwrap();

        let factory = KernelFactory::new(Arc::new(provider), Address::repeat_byte(1));
        assert_eq!(factory.get_address(Bytes::default(), [0u8; 32]).await.unwrap(), account);
    }
}
