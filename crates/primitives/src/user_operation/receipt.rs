use super::UserOperationHash;
use crate::utils::{as_checksum_addr, as_checksum_addr_opt};
use ethers::types::{Address, Log, TransactionReceipt, U256};
use serde::{Deserialize, Serialize};

/// Receipt of the user operation (returned from the RPC endpoint eth_getUserOperationReceipt)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationReceipt {
    #[serde(rename = "userOpHash")]
    pub user_operation_hash: UserOperationHash,
    #[serde(serialize_with = "as_checksum_addr")]
    pub entry_point: Address,
    #[serde(serialize_with = "as_checksum_addr")]
    pub sender: Address,
    pub nonce: U256,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "as_checksum_addr_opt"
    )]
    pub paymaster: Option<Address>,
    pub actual_gas_cost: U256,
    pub actual_gas_used: U256,
    pub success: bool,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub logs: Vec<Log>,
    #[serde(rename = "receipt")]
    pub tx_receipt: TransactionReceipt,
}

/// Gas estimations for user operation (returned from the RPC endpoint eth_estimateUserOperationGas)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationGasEstimation {
    pub pre_verification_gas: U256,
    pub verification_gas_limit: U256,
    pub call_gas_limit: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_verification_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_post_op_gas_limit: Option<U256>,
}

/// EIP-1559 fee pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPrice {
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

/// Fee tiers suggested by the bundler (returned from the RPC endpoint
/// zd_getUserOperationGasPrice)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOperationGasPrice {
    pub slow: GasPrice,
    pub standard: GasPrice,
    pub fast: GasPrice,
}
