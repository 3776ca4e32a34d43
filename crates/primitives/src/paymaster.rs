//! Paymaster sponsorship request and result (zd_sponsorUserOperation)

use crate::{utils::as_checksum_addr, UserOperationRequest, UserOperationSigned};
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Parameters of `zd_sponsorUserOperation`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorUserOperationRequest {
    pub chain_id: u64,
    pub user_op: UserOperationRequest,
    #[serde(serialize_with = "as_checksum_addr")]
    pub entry_point_address: Address,
    /// Let the paymaster replace the fees set on the user operation
    #[serde(default)]
    pub should_override_fee: bool,
    /// Skip the gas estimation done by the paymaster
    #[serde(default)]
    pub manual_gas_estimation: bool,
    /// Count the sponsorship against the project's gas policies
    #[serde(default)]
    pub should_consume: bool,
}

impl SponsorUserOperationRequest {
    pub fn new(chain_id: u64, user_op: UserOperationSigned, entry_point: Address) -> Self {
        Self {
            chain_id,
            user_op: user_op.into(),
            entry_point_address: entry_point,
            should_override_fee: false,
            manual_gas_estimation: false,
            should_consume: true,
        }
    }
}

/// Result of `zd_sponsorUserOperation` for entry point v0.7
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorUserOperationResult {
    #[serde(serialize_with = "as_checksum_addr")]
    pub paymaster: Address,
    pub paymaster_data: Bytes,
    pub paymaster_verification_gas_limit: U256,
    pub paymaster_post_op_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub verification_gas_limit: U256,
    pub call_gas_limit: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
}

impl SponsorUserOperationResult {
    /// Fills the gas and paymaster fields of the user operation; fees are replaced only when the
    /// paymaster returned them
    pub fn apply(self, uo: UserOperationSigned) -> UserOperationSigned {
        let max_fee_per_gas = self.max_fee_per_gas.unwrap_or(uo.max_fee_per_gas);
        let max_priority_fee_per_gas =
            self.max_priority_fee_per_gas.unwrap_or(uo.max_priority_fee_per_gas);

        uo.call_gas_limit(self.call_gas_limit)
            .verification_gas_limit(self.verification_gas_limit)
            .pre_verification_gas(self.pre_verification_gas)
            .max_fee_per_gas(max_fee_per_gas)
            .max_priority_fee_per_gas(max_priority_fee_per_gas)
            .paymaster(
                self.paymaster,
                self.paymaster_verification_gas_limit,
                self.paymaster_post_op_gas_limit,
                self.paymaster_data,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sponsor_request_json() {
        let uo = UserOperationSigned::default().sender(Address::repeat_byte(0x11));
        let request = SponsorUserOperationRequest::new(
            84532,
            uo,
            crate::constants::entry_point::ADDRESS.parse().unwrap(),
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["chainId"], json!(84532));
        assert_eq!(value["entryPointAddress"], json!("0x0000000071727De22E5E9d8BAf0edAc6f37da032"));
        assert_eq!(value["shouldConsume"], json!(true));
        assert_eq!(value["userOp"]["sender"], json!("0x1111111111111111111111111111111111111111"));
    }

    #[test]
    fn sponsor_result_apply() {
        let result: SponsorUserOperationResult = serde_json::from_value(json!({
            "paymaster": "0x95222290DD7278Aa3Ddd389Cc1E1d165CC4BAfe5",
            "paymasterData": "0x01020304",
            "paymasterVerificationGasLimit": "0x8000",
            "paymasterPostOpGasLimit": "0x1",
            "preVerificationGas": "0xc350",
            "verificationGasLimit": "0x20000",
            "callGasLimit": "0x3000",
        }))
        .unwrap();

        let uo = UserOperationSigned::default()
            .max_fee_per_gas(100.into())
            .max_priority_fee_per_gas(10.into());
        let uo = result.clone().apply(uo);
        assert_eq!(uo.paymaster, Some(result.paymaster));
        assert_eq!(uo.paymaster_verification_gas_limit, 0x8000.into());
        assert_eq!(uo.pre_verification_gas, 50_000.into());
        assert_eq!(uo.call_gas_limit, 0x3000.into());
        assert_eq!(uo.max_fee_per_gas, 100.into());

        let overriding = SponsorUserOperationResult { max_fee_per_gas: Some(7.into()), ..result };
        assert_eq!(overriding.apply(uo).max_fee_per_gas, 7.into());
    }
}
