use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use quickstart_primitives::{SponsorUserOperationRequest, SponsorUserOperationResult};

/// The `zd` namespace RPC methods of the ZeroDev paymaster
#[rpc(client, server, namespace = "zd")]
pub trait PaymasterApi {
    /// Ask the paymaster to sponsor the user operation.
    ///
    /// The paymaster simulates the operation and answers with its gas limits and the paymaster
    /// fields to sign over.
    #[method(name = "sponsorUserOperation")]
    async fn sponsor_user_operation(
        &self,
        request: SponsorUserOperationRequest,
    ) -> RpcResult<SponsorUserOperationResult>;
}
