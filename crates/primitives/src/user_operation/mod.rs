//! Basic transaction type for account abstraction (ERC-4337, entry point v0.7)

mod hash;
mod receipt;
mod request;

use crate::{
    authorization::Eip7702Auth,
    utils::{pack_factory_data, pack_paymaster_data, pack_uint128},
};
use ethers::{
    abi::AbiEncode,
    contract::{EthAbiCodec, EthAbiType},
    types::{Address, Bytes, H256, U256},
    utils::keccak256,
};
pub use hash::UserOperationHash;
pub use receipt::{
    GasPrice, UserOperationGasEstimation, UserOperationGasPrice, UserOperationReceipt,
};
pub use request::UserOperationRequest;

/// User operation (unpacked v0.7 form, as sent over RPC)
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct UserOperationSigned {
    /// Sender of the user operation
    pub sender: Address,

    /// Nonce (anti replay protection), upper 192 bits are the nonce key
    pub nonce: U256,

    /// Factory deploying the account (only if the account is not yet deployed)
    pub factory: Option<Address>,

    /// Data passed to the factory
    pub factory_data: Bytes,

    /// The data that is passed to the sender during the main execution call
    pub call_data: Bytes,

    /// The amount of gas to allocate for the main execution call
    pub call_gas_limit: U256,

    /// The amount of gas to allocate for the verification step
    pub verification_gas_limit: U256,

    /// The amount of gas to pay bundler to compensate for the pre-verification execution and
    /// calldata
    pub pre_verification_gas: U256,

    /// Maximum fee per gas (similar to EIP-1559)
    pub max_fee_per_gas: U256,

    /// Maximum priority fee per gas (similar to EIP-1559)
    pub max_priority_fee_per_gas: U256,

    /// Paymaster sponsoring the user operation
    pub paymaster: Option<Address>,

    /// The amount of gas to allocate for the paymaster validation
    pub paymaster_verification_gas_limit: U256,

    /// The amount of gas to allocate for the paymaster post-operation
    pub paymaster_post_op_gas_limit: U256,

    /// Extra data sent to the paymaster
    pub paymaster_data: Bytes,

    /// Data passed to the account along with the nonce during the verification step
    pub signature: Bytes,

    /// EIP-7702 authorization delegating the sender EOA to the account implementation
    pub eip7702_auth: Option<Eip7702Auth>,
}

/// User operation without signature (helper for packing user operation)
#[derive(EthAbiCodec, EthAbiType)]
struct PackedUserOperationNoSignature {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: H256,
    pub call_data: H256,
    pub account_gas_limits: H256,
    pub pre_verification_gas: U256,
    pub gas_fees: H256,
    pub paymaster_and_data: H256,
}

impl From<&UserOperationSigned> for PackedUserOperationNoSignature {
    fn from(value: &UserOperationSigned) -> Self {
        Self {
            sender: value.sender,
            nonce: value.nonce,
            init_code: keccak256(value.init_code()).into(),
            call_data: keccak256(&value.call_data).into(),
            account_gas_limits: pack_uint128(value.verification_gas_limit, value.call_gas_limit)
                .into(),
            pre_verification_gas: value.pre_verification_gas,
            gas_fees: pack_uint128(value.max_priority_fee_per_gas, value.max_fee_per_gas).into(),
            paymaster_and_data: keccak256(value.paymaster_and_data()).into(),
        }
    }
}

impl UserOperationSigned {
    /// `factory ++ factoryData`, empty when the account already exists
    pub fn init_code(&self) -> Bytes {
        match self.factory {
            Some(factory) => pack_factory_data(factory, &self.factory_data).into(),
            None => Bytes::default(),
        }
    }

    /// `paymaster ++ verificationGasLimit ++ postOpGasLimit ++ paymasterData`, empty without
    /// paymaster
    pub fn paymaster_and_data(&self) -> Bytes {
        match self.paymaster {
            Some(paymaster) => pack_paymaster_data(
                paymaster,
                self.paymaster_verification_gas_limit,
                self.paymaster_post_op_gas_limit,
                &self.paymaster_data,
            )
            .into(),
            None => Bytes::default(),
        }
    }

    /// Packs the user operation without signature to bytes (used for calculating the hash)
    pub fn pack_without_signature(&self) -> Bytes {
        PackedUserOperationNoSignature::from(self).encode().into()
    }

    /// Calculates the hash of the user operation
    pub fn hash(&self, entry_point: &Address, chain_id: u64) -> UserOperationHash {
        H256::from(keccak256(
            [
                keccak256(self.pack_without_signature()).to_vec(),
                entry_point.encode(),
                U256::from(chain_id).encode(),
            ]
            .concat(),
        ))
        .into()
    }

    // Builder pattern helpers

    /// Sets the sender of the user operation
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = sender;
        self
    }

    /// Sets the nonce of the user operation
    pub fn nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the factory and the factory data of the user operation
    pub fn factory(mut self, factory: Address, factory_data: Bytes) -> Self {
        self.factory = Some(factory);
        self.factory_data = factory_data;
        self
    }

    /// Sets the call data of the user operation
    pub fn call_data(mut self, call_data: Bytes) -> Self {
        self.call_data = call_data;
        self
    }

    /// Sets the call gas limit of the user operation
    pub fn call_gas_limit(mut self, call_gas_limit: U256) -> Self {
        self.call_gas_limit = call_gas_limit;
        self
    }

    /// Sets the verification gas limit of the user operation
    pub fn verification_gas_limit(mut self, verification_gas_limit: U256) -> Self {
        self.verification_gas_limit = verification_gas_limit;
        self
    }

    /// Sets the pre-verification gas of the user operation
    pub fn pre_verification_gas(mut self, pre_verification_gas: U256) -> Self {
        self.pre_verification_gas = pre_verification_gas;
        self
    }

    /// Sets the max fee per gas of the user operation
    pub fn max_fee_per_gas(mut self, max_fee_per_gas: U256) -> Self {
        self.max_fee_per_gas = max_fee_per_gas;
        self
    }

    /// Sets the max priority fee per gas of the user operation
    pub fn max_priority_fee_per_gas(mut self, max_priority_fee_per_gas: U256) -> Self {
        self.max_priority_fee_per_gas = max_priority_fee_per_gas;
        self
    }

    /// Sets the paymaster fields of the user operation
    pub fn paymaster(
        mut self,
        paymaster: Address,
        paymaster_verification_gas_limit: U256,
        paymaster_post_op_gas_limit: U256,
        paymaster_data: Bytes,
    ) -> Self {
        self.paymaster = Some(paymaster);
        self.paymaster_verification_gas_limit = paymaster_verification_gas_limit;
        self.paymaster_post_op_gas_limit = paymaster_post_op_gas_limit;
        self.paymaster_data = paymaster_data;
        self
    }

    /// Sets the signature of the user operation
    pub fn signature(mut self, signature: Bytes) -> Self {
        self.signature = signature;
        self
    }

    /// Attaches an EIP-7702 authorization to the user operation
    pub fn eip7702_auth(mut self, eip7702_auth: Eip7702Auth) -> Self {
        self.eip7702_auth = Some(eip7702_auth);
        self
    }
}
