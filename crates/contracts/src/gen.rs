use ethers::contract::abigen;

abigen!(
    EntryPointAPI,
    r#"[
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce)
        function balanceOf(address account) external view returns (uint256)
    ]"#
);

abigen!(
    KernelFactoryAPI,
    r#"[
        function getAddress(bytes calldata data, bytes32 salt) external view returns (address)
    ]"#
);

abigen!(
    FactoryStakerAPI,
    r#"[
        function deployWithFactory(address factory, bytes calldata createData, bytes32 salt) external payable returns (address)
    ]"#
);

abigen!(
    KernelAPI,
    r#"[
        function initialize(bytes21 rootValidator, address hook, bytes calldata validatorData, bytes calldata hookData, bytes[] calldata initConfig) external
        function execute(bytes32 execMode, bytes calldata executionCalldata) external payable
    ]"#
);

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::contract::EthCall;

    #[test]
    fn selectors() {
        assert_eq!(entry_point_api::GetNonceCall::selector(), [0x35, 0x56, 0x7e, 0x1a]);
        assert_eq!(kernel_factory_api::GetAddressCall::selector(), [0x48, 0xaa, 0xc3, 0x92]);
        assert_eq!(factory_staker_api::DeployWithFactoryCall::selector(), [0xc5, 0x26, 0x5d, 0x5d]);
        assert_eq!(kernel_api::InitializeCall::selector(), [0x3c, 0x3b, 0x75, 0x2b]);
        assert_eq!(kernel_api::ExecuteCall::selector(), [0xe9, 0xae, 0x5c, 0x53]);
    }
}
