//! User operation as sent over JSON-RPC (unpacked v0.7 fields, optional parts omitted)

use super::UserOperationSigned;
use crate::{
    authorization::Eip7702Auth,
    utils::{as_checksum_addr, as_checksum_addr_opt},
};
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// User operation with the optional v0.7 fields left out of the JSON when unset
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationRequest {
    #[serde(serialize_with = "as_checksum_addr")]
    pub sender: Address,
    pub nonce: U256,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "as_checksum_addr_opt"
    )]
    pub factory: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_data: Option<Bytes>,
    pub call_data: Bytes,
    #[serde(default)]
    pub call_gas_limit: U256,
    #[serde(default)]
    pub verification_gas_limit: U256,
    #[serde(default)]
    pub pre_verification_gas: U256,
    #[serde(default)]
    pub max_fee_per_gas: U256,
    #[serde(default)]
    pub max_priority_fee_per_gas: U256,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "as_checksum_addr_opt"
    )]
    pub paymaster: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_verification_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_post_op_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_data: Option<Bytes>,
    #[serde(default)]
    pub signature: Bytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip7702_auth: Option<Eip7702Auth>,
}

impl From<UserOperationRequest> for UserOperationSigned {
    fn from(user_operation: UserOperationRequest) -> Self {
        Self {
            sender: user_operation.sender,
            nonce: user_operation.nonce,
            factory: user_operation.factory,
            factory_data: user_operation.factory_data.unwrap_or_default(),
            call_data: user_operation.call_data,
            call_gas_limit: user_operation.call_gas_limit,
            verification_gas_limit: user_operation.verification_gas_limit,
            pre_verification_gas: user_operation.pre_verification_gas,
            max_fee_per_gas: user_operation.max_fee_per_gas,
            max_priority_fee_per_gas: user_operation.max_priority_fee_per_gas,
            paymaster: user_operation.paymaster,
            paymaster_verification_gas_limit: user_operation
                .paymaster_verification_gas_limit
                .unwrap_or_default(),
            paymaster_post_op_gas_limit: user_operation
                .paymaster_post_op_gas_limit
                .unwrap_or_default(),
            paymaster_data: user_operation.paymaster_data.unwrap_or_default(),
            signature: user_operation.signature,
            eip7702_auth: user_operation.eip7702_auth,
        }
    }
}

impl From<UserOperationSigned> for UserOperationRequest {
    fn from(user_operation: UserOperationSigned) -> Self {
        let factory_data = user_operation.factory.map(|_| user_operation.factory_data);
        let (paymaster_verification_gas_limit, paymaster_post_op_gas_limit, paymaster_data) =
            if user_operation.paymaster.is_some() {
                (
                    Some(user_operation.paymaster_verification_gas_limit),
                    Some(user_operation.paymaster_post_op_gas_limit),
                    Some(user_operation.paymaster_data),
                )
            } else {
                (None, None, None)
            };

        Self {
            sender: user_operation.sender,
            nonce: user_operation.nonce,
            factory: user_operation.factory,
            factory_data,
            call_data: user_operation.call_data,
            call_gas_limit: user_operation.call_gas_limit,
            verification_gas_limit: user_operation.verification_gas_limit,
            pre_verification_gas: user_operation.pre_verification_gas,
            max_fee_per_gas: user_operation.max_fee_per_gas,
            max_priority_fee_per_gas: user_operation.max_priority_fee_per_gas,
            paymaster: user_operation.paymaster,
            paymaster_verification_gas_limit,
            paymaster_post_op_gas_limit,
            paymaster_data,
            signature: user_operation.signature,
            eip7702_auth: user_operation.eip7702_auth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_are_omitted() {
        let uo = UserOperationSigned::default()
            .sender("0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap())
            .call_gas_limit(0x30d40.into());
        let value = serde_json::to_value(UserOperationRequest::from(uo)).unwrap();

        assert_eq!(value["sender"], json!("0x9c5754De1443984659E1b3a8d1931D83475ba29C"));
        assert_eq!(value["callGasLimit"], json!("0x30d40"));
        assert_eq!(value["callData"], json!("0x"));
        for field in ["factory", "factoryData", "paymaster", "paymasterData", "eip7702Auth"] {
            assert!(value.get(field).is_none(), "{field} should be omitted");
        }
    }

    #[test]
    fn factory_and_paymaster_fields() {
        let factory: Address = "0xd703aaE79538628d27099B8c4f621bE4CCd142d5".parse().unwrap();
        let paymaster: Address = "0x95222290DD7278Aa3Ddd389Cc1E1d165CC4BAfe5".parse().unwrap();
        let uo = UserOperationSigned::default()
            .factory(factory, "0xc5265d5d".parse().unwrap())
            .paymaster(paymaster, 0x1000.into(), 0x10.into(), "0x01".parse().unwrap());

        let request = UserOperationRequest::from(uo.clone());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["factory"], json!("0xd703aaE79538628d27099B8c4f621bE4CCd142d5"));
        assert_eq!(value["factoryData"], json!("0xc5265d5d"));
        assert_eq!(value["paymasterVerificationGasLimit"], json!("0x1000"));
        assert_eq!(value["paymasterPostOpGasLimit"], json!("0x10"));

        let back: UserOperationRequest = serde_json::from_value(value).unwrap();
        assert_eq!(UserOperationSigned::from(back), uo);
    }
}
