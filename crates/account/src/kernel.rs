use crate::{
    addresses::{ACCOUNT_IMPLEMENTATION, ENTRY_POINT, FACTORY, META_FACTORY},
    call::{encode_calls, Call},
    error::AccountError,
    validator::EcdsaValidator,
};
use async_trait::async_trait;
use ethers::{
    abi::AbiEncode,
    providers::Middleware,
    types::{Address, BlockNumber, Bytes, U256},
};
use quickstart_contracts::{
    factory_staker_api::DeployWithFactoryCall, kernel_api::InitializeCall, EntryPoint,
    KernelFactory,
};
use quickstart_primitives::{
    constants::eip7702::DELEGATION_PREFIX, Eip7702Auth, UserOperationSigned, Wallet,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Smart account as needed to build and sign user operations
#[async_trait]
pub trait SmartAccount: Send + Sync {
    /// Address of the account (the user operation sender)
    fn address(&self) -> Address;

    fn entry_point(&self) -> Address;

    fn chain_id(&self) -> u64;

    /// Whether the account code is in place
    async fn is_deployed(&self) -> Result<bool, AccountError>;

    /// Factory and factory data deploying the account, `None` once deployed
    async fn factory_args(&self) -> Result<Option<(Address, Bytes)>, AccountError>;

    /// Next entry point nonce of the account
    async fn get_nonce(&self) -> Result<U256, AccountError>;

    /// Account call data executing `calls`
    fn encode_calls(&self, calls: &[Call]) -> Result<Bytes, AccountError> {
        encode_calls(calls)
    }

    /// Signature of the right shape for gas estimation and sponsorship
    fn dummy_signature(&self) -> Bytes;

    /// EIP-7702 authorization to attach to the next user operation
    async fn authorization(&self) -> Result<Option<Eip7702Auth>, AccountError>;

    async fn sign_user_operation(&self, uo: &UserOperationSigned) -> Result<Bytes, AccountError>;
}

/// How the account code comes to exist
#[derive(Clone, Debug, PartialEq, Eq)]
enum AccountMode {
    /// Deployed through the meta factory by the first user operation
    Counterfactual { index: u64 },
    /// The owner EOA delegated to the Kernel implementation
    Eip7702 { authorization: Eip7702Auth },
}

/// Kernel v3.1 account with an ECDSA root validator
#[derive(Clone)]
pub struct KernelAccount<M: Middleware + 'static> {
    eth_client: Arc<M>,
    entry_point: EntryPoint<M>,
    validator: EcdsaValidator,
    chain_id: u64,
    address: Address,
    mode: AccountMode,
}

impl<M: Middleware + 'static> KernelAccount<M> {
    /// Counterfactual account number `index` of the validator owner
    pub async fn new(
        eth_client: Arc<M>,
        validator: EcdsaValidator,
        index: u64,
    ) -> Result<Self, AccountError> {
        let chain_id = eth_client.get_chainid().await.map_err(AccountError::provider)?.as_u64();

        let factory = KernelFactory::new(eth_client.clone(), *FACTORY);
        let address = factory.get_address(initialize_data(&validator), salt(index)).await?;
        debug!("Kernel account {address:?} (index {index}) on chain {chain_id}");

        Ok(Self {
            entry_point: EntryPoint::new(eth_client.clone(), *ENTRY_POINT),
            eth_client,
            validator,
            chain_id,
            address,
            mode: AccountMode::Counterfactual { index },
        })
    }

    /// Account living at the owner EOA, delegated to the Kernel implementation by `authorization`
    pub async fn new_7702(
        eth_client: Arc<M>,
        validator: EcdsaValidator,
        authorization: Eip7702Auth,
    ) -> Result<Self, AccountError> {
        let owner = validator.owner().address();
        authorization.validate(owner)?;
        if authorization.address != *ACCOUNT_IMPLEMENTATION {
            return Err(AccountError::WrongDelegate {
                found: authorization.address,
                expected: *ACCOUNT_IMPLEMENTATION,
            });
        }

        let chain_id = eth_client.get_chainid().await.map_err(AccountError::provider)?.as_u64();

        Ok(Self {
            entry_point: EntryPoint::new(eth_client.clone(), *ENTRY_POINT),
            eth_client,
            validator,
            chain_id,
            address: owner,
            mode: AccountMode::Eip7702 { authorization },
        })
    }

    async fn code(&self) -> Result<Bytes, AccountError> {
        self.eth_client.get_code(self.address, None).await.map_err(AccountError::provider)
    }
}

#[async_trait]
impl<M: Middleware + 'static> SmartAccount for KernelAccount<M> {
    fn address(&self) -> Address {
        self.address
    }

    fn entry_point(&self) -> Address {
        self.entry_point.address()
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn is_deployed(&self) -> Result<bool, AccountError> {
        let code = self.code().await?;
        Ok(match self.mode {
            AccountMode::Counterfactual { .. } => !code.is_empty(),
            AccountMode::Eip7702 { .. } => {
                delegation_target(&code) == Some(*ACCOUNT_IMPLEMENTATION)
            }
        })
    }

    async fn factory_args(&self) -> Result<Option<(Address, Bytes)>, AccountError> {
        match self.mode {
            AccountMode::Counterfactual { index } if !self.is_deployed().await? => {
                Ok(Some((*META_FACTORY, factory_data(&self.validator, index))))
            }
            _ => Ok(None),
        }
    }

    async fn get_nonce(&self) -> Result<U256, AccountError> {
        Ok(self.entry_point.get_nonce(self.address, self.validator.nonce_key(0)).await?)
    }

    fn dummy_signature(&self) -> Bytes {
        self.validator.dummy_signature()
    }

    async fn authorization(&self) -> Result<Option<Eip7702Auth>, AccountError> {
        match &self.mode {
            AccountMode::Eip7702 { authorization } => {
                if self.is_deployed().await? {
                    debug!("{:?} already delegated, authorization not attached", self.address);
                    Ok(None)
                } else {
                    Ok(Some(authorization.clone()))
                }
            }
            AccountMode::Counterfactual { .. } => Ok(None),
        }
    }

    async fn sign_user_operation(&self, uo: &UserOperationSigned) -> Result<Bytes, AccountError> {
        self.validator.sign_user_operation(uo, &self.entry_point.address(), self.chain_id).await
    }
}

/// Signs an authorization delegating the owner EOA to `implementation`
///
/// The user operation is submitted by the bundler, so the authorization is valid for the current
/// (pending) nonce of the EOA.
pub async fn sign_authorization<M: Middleware>(
    eth_client: &M,
    owner: &Wallet,
    implementation: Address,
) -> Result<Eip7702Auth, AccountError> {
    let chain_id = eth_client.get_chainid().await.map_err(AccountError::provider)?.as_u64();
    let nonce = eth_client
        .get_transaction_count(owner.address(), Some(BlockNumber::Pending.into()))
        .await
        .map_err(AccountError::provider)?;

    let authorization = owner
        .sign_authorization(chain_id, implementation, nonce.as_u64())
        .map_err(AccountError::signer)?;
    info!("Signed delegation of {:?} to {implementation:?}", owner.address());
    Ok(authorization)
}

/// Implementation the EOA code delegates to (`0xef0100 || address`)
pub fn delegation_target(code: &[u8]) -> Option<Address> {
    if code.len() == 23 && code.starts_with(&DELEGATION_PREFIX) {
        Some(Address::from_slice(&code[3..]))
    } else {
        None
    }
}

fn salt(index: u64) -> [u8; 32] {
    let mut salt = [0u8; 32];
    U256::from(index).to_big_endian(&mut salt);
    salt
}

/// `initialize` call installing the validator as root, without hook nor extra config
fn initialize_data(validator: &EcdsaValidator) -> Bytes {
    InitializeCall {
        root_validator: validator.root_validator_id(),
        hook: Address::zero(),
        validator_data: validator.enable_data(),
        hook_data: Bytes::default(),
        init_config: vec![],
    }
    .encode()
    .into()
}

/// Meta factory call deploying the account through the Kernel factory
fn factory_data(validator: &EcdsaValidator, index: u64) -> Bytes {
    DeployWithFactoryCall {
        factory: *FACTORY,
        create_data: initialize_data(validator),
        salt: salt(index),
    }
    .encode()
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::AbiDecode;

    const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn validator() -> EcdsaValidator {
        EcdsaValidator::new(Wallet::from_private_key(PRIVATE_KEY).unwrap())
    }

    #[test]
    fn initialize() {
        let validator = validator();
        let call = InitializeCall::decode(initialize_data(&validator)).unwrap();

        assert_eq!(call.root_validator, validator.root_validator_id());
        assert_eq!(call.hook, Address::zero());
        assert_eq!(call.validator_data, validator.enable_data());
        assert!(call.hook_data.is_empty());
        assert!(call.init_config.is_empty());
    }

    #[test]
    fn deploy_with_factory() {
        let validator = validator();
        let data = factory_data(&validator, 3);
        assert_eq!(&data[..4], &[0xc5, 0x26, 0x5d, 0x5d]);

        let call = DeployWithFactoryCall::decode(data).unwrap();
        assert_eq!(call.factory, *FACTORY);
        assert_eq!(call.create_data, initialize_data(&validator));
        assert_eq!(U256::from_big_endian(&call.salt), 3.into());
    }

    #[test]
    fn delegation() {
        let code = [DELEGATION_PREFIX.as_slice(), ACCOUNT_IMPLEMENTATION.as_bytes()].concat();
        assert_eq!(delegation_target(&code), Some(*ACCOUNT_IMPLEMENTATION));

        assert_eq!(delegation_target(&[]), None);
        assert_eq!(delegation_target(&code[..22]), None);
        let mut contract = code.clone();
        contract[0] = 0x60;
        assert_eq!(delegation_target(&contract), None);
    }

    #[tokio::test]
    async fn reject_foreign_authorization() {
        let (provider, _mock) = ethers::providers::Provider::mocked();
        let provider = Arc::new(provider);
        let owner = Wallet::from_private_key(PRIVATE_KEY).unwrap();

        let other =
            Wallet::build_random().sign_authorization(1, *ACCOUNT_IMPLEMENTATION, 0).unwrap();
        let err = KernelAccount::new_7702(provider.clone(), validator(), other).await.err();
        assert!(matches!(err, Some(AccountError::Authorization(_))));

        let elsewhere = owner.sign_authorization(1, Address::repeat_byte(1), 0).unwrap();
        let err = KernelAccount::new_7702(provider, validator(), elsewhere).await.err();
        assert!(matches!(err, Some(AccountError::WrongDelegate { .. })));
    }
}
