use ethers::types::{Address, U64};
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use quickstart_primitives::{
    UserOperationGasEstimation, UserOperationGasPrice, UserOperationHash, UserOperationReceipt,
    UserOperationRequest,
};

/// The ERC-4337 `eth` namespace RPC methods of the bundler
#[rpc(client, server, namespace = "eth")]
pub trait BundlerApi {
    /// Retrieve the current [EIP-155](https://eips.ethereum.org/EIPS/eip-155) chain ID.
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    /// Get the entry points the bundler accepts user operations for.
    #[method(name = "supportedEntryPoints")]
    async fn supported_entry_points(&self) -> RpcResult<Vec<Address>>;

    /// Send a signed user operation.
    ///
    /// # Arguments
    /// * `user_operation: UserOperationRequest` - The user operation to be sent.
    /// * `entry_point: Address` - The address of the entry point.
    ///
    /// # Returns
    /// * `RpcResult<UserOperationHash>` - The hash of the sent user operation.
    #[method(name = "sendUserOperation")]
    async fn send_user_operation(
        &self,
        user_operation: UserOperationRequest,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash>;

    /// Estimate the gas limits of a user operation signed with a dummy signature.
    #[method(name = "estimateUserOperationGas")]
    async fn estimate_user_operation_gas(
        &self,
        user_operation: UserOperationRequest,
        entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation>;

    /// Retrieve the receipt of a user operation, `None` until it is included.
    #[method(name = "getUserOperationReceipt")]
    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>>;
}

/// The `zd` namespace RPC methods served by the ZeroDev bundler
#[rpc(client, server, namespace = "zd")]
pub trait ZeroDevBundlerApi {
    /// Fee tiers the bundler currently accepts.
    #[method(name = "getUserOperationGasPrice")]
    async fn get_user_operation_gas_price(&self) -> RpcResult<UserOperationGasPrice>;
}
