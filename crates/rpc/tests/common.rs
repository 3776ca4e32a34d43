#![allow(dead_code)]

use async_trait::async_trait;
use ethers::{
    abi::AbiEncode,
    types::{Address, Bytes, TransactionReceipt, H256, U256, U64},
};
use jsonrpsee::{
    core::RpcResult,
    proc_macros::rpc,
    server::ServerBuilder,
    types::{error::ErrorCode, ErrorObjectOwned},
    Methods,
};
use quickstart_primitives::{
    GasPrice, SponsorUserOperationRequest, SponsorUserOperationResult, UserOperationGasEstimation,
    UserOperationGasPrice, UserOperationHash, UserOperationReceipt, UserOperationRequest,
    UserOperationSigned,
};
use quickstart_rpc::{BundlerApiServer, PaymasterApiServer, ZeroDevBundlerApiServer};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

pub const CHAIN_ID: u64 = 11155111;
pub const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Starts a JSON-RPC server on a free local port and returns its URL
pub async fn start_server(methods: impl Into<Methods>) -> String {
    let server = ServerBuilder::default().build("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    let handle = server.start(methods);
    tokio::spawn(handle.stopped());
    format!("http://{addr}")
}

fn invalid_params(message: &str) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(ErrorCode::InvalidParams.code(), message.to_string(), None::<bool>)
}

/// Subset of the node `eth` namespace used by the account
#[rpc(server, namespace = "eth")]
pub trait NodeApi {
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    #[method(name = "getCode")]
    async fn get_code(
        &self,
        address: Address,
        block: Option<serde_json::Value>,
    ) -> RpcResult<Bytes>;

    #[method(name = "getTransactionCount")]
    async fn get_transaction_count(
        &self,
        address: Address,
        block: Option<serde_json::Value>,
    ) -> RpcResult<U256>;

    #[method(name = "call")]
    async fn call(
        &self,
        tx: serde_json::Value,
        block: Option<serde_json::Value>,
    ) -> RpcResult<Bytes>;
}

/// Node answering the factory `getAddress` and the entry point `getNonce` calls
#[derive(Clone, Default)]
pub struct NodeMock {
    pub chain_id: u64,
    pub account: Address,
    pub code: Bytes,
    pub nonce: U256,
    pub transaction_count: U256,
}

#[async_trait]
impl NodeApiServer for NodeMock {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(self.chain_id.into())
    }

    async fn get_code(
        &self,
        _address: Address,
        _block: Option<serde_json::Value>,
    ) -> RpcResult<Bytes> {
        Ok(self.code.clone())
    }

    async fn get_transaction_count(
        &self,
        _address: Address,
        _block: Option<serde_json::Value>,
    ) -> RpcResult<U256> {
        Ok(self.transaction_count)
    }

    async fn call(
        &self,
        tx: serde_json::Value,
        _block: Option<serde_json::Value>,
    ) -> RpcResult<Bytes> {
        let data = tx
            .get("data")
            .or_else(|| tx.get("input"))
            .and_then(|data| serde_json::from_value::<Bytes>(data.clone()).ok())
            .ok_or_else(|| invalid_params("missing call data"))?;

        match data.get(..4) {
            // getAddress(bytes,bytes32)
            Some([0x48, 0xaa, 0xc3, 0x92]) => Ok(self.account.encode().into()),
            // getNonce(address,uint192)
            Some([0x35, 0x56, 0x7e, 0x1a]) => Ok(self.nonce.encode().into()),
            _ => Err(invalid_params("unknown selector")),
        }
    }
}

#[derive(Default)]
pub struct BundlerState {
    pub sent: Mutex<Vec<UserOperationRequest>>,
    pub estimated: Mutex<Vec<UserOperationRequest>>,
    pub polls: AtomicUsize,
}

/// Bundler accepting every user operation, included after `receipt_after` receipt polls
#[derive(Clone)]
pub struct BundlerMock {
    pub chain_id: u64,
    pub entry_points: Vec<Address>,
    pub gas_price: UserOperationGasPrice,
    pub estimation: UserOperationGasEstimation,
    pub receipt_after: usize,
    pub state: Arc<BundlerState>,
}

impl BundlerMock {
    pub fn new(chain_id: u64, entry_point: Address) -> Self {
        Self {
            chain_id,
            entry_points: vec![entry_point],
            gas_price: UserOperationGasPrice {
                slow: GasPrice {
                    max_fee_per_gas: 1_000.into(),
                    max_priority_fee_per_gas: 1.into(),
                },
                standard: GasPrice {
                    max_fee_per_gas: 2_000.into(),
                    max_priority_fee_per_gas: 2.into(),
                },
                fast: GasPrice {
                    max_fee_per_gas: 3_000.into(),
                    max_priority_fee_per_gas: 3.into(),
                },
            },
            estimation: UserOperationGasEstimation {
                pre_verification_gas: 50_000.into(),
                verification_gas_limit: 400_000.into(),
                call_gas_limit: 30_000.into(),
                ..Default::default()
            },
            receipt_after: 2,
            state: Arc::new(BundlerState::default()),
        }
    }

    pub fn into_methods(self) -> Methods {
        let mut module = BundlerApiServer::into_rpc(self.clone());
        module.merge(ZeroDevBundlerApiServer::into_rpc(self)).unwrap();
        module.into()
    }

    pub fn sent(&self) -> Vec<UserOperationRequest> {
        self.state.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BundlerApiServer for BundlerMock {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(self.chain_id.into())
    }

    async fn supported_entry_points(&self) -> RpcResult<Vec<Address>> {
        Ok(self.entry_points.clone())
    }

    async fn send_user_operation(
        &self,
        user_operation: UserOperationRequest,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash> {
        let hash =
            UserOperationSigned::from(user_operation.clone()).hash(&entry_point, self.chain_id);
        self.state.sent.lock().unwrap().push(user_operation);
        Ok(hash)
    }

    async fn estimate_user_operation_gas(
        &self,
        user_operation: UserOperationRequest,
        _entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation> {
        self.state.estimated.lock().unwrap().push(user_operation);
        Ok(self.estimation.clone())
    }

    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>> {
        let polls = self.state.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if polls < self.receipt_after {
            return Ok(None);
        }

        let sent = self.sent();
        let Some(uo) = sent.last() else {
            return Ok(None);
        };
        Ok(Some(UserOperationReceipt {
            user_operation_hash,
            entry_point: self.entry_points[0],
            sender: uo.sender,
            nonce: uo.nonce,
            paymaster: uo.paymaster,
            actual_gas_cost: 1_000_000.into(),
            actual_gas_used: 500.into(),
            success: true,
            reason: String::new(),
            logs: vec![],
            tx_receipt: TransactionReceipt {
                transaction_hash: H256::repeat_byte(0xab),
                ..Default::default()
            },
        }))
    }
}

#[async_trait]
impl ZeroDevBundlerApiServer for BundlerMock {
    async fn get_user_operation_gas_price(&self) -> RpcResult<UserOperationGasPrice> {
        Ok(self.gas_price)
    }
}

/// Paymaster sponsoring every user operation
#[derive(Clone)]
pub struct PaymasterMock {
    pub result: SponsorUserOperationResult,
    pub requests: Arc<Mutex<Vec<SponsorUserOperationRequest>>>,
}

impl PaymasterMock {
    pub fn new() -> Self {
        Self {
            result: SponsorUserOperationResult {
                paymaster: Address::repeat_byte(0x99),
                paymaster_data: vec![0xde, 0xad, 0xbe, 0xef].into(),
                paymaster_verification_gas_limit: 60_000.into(),
                paymaster_post_op_gas_limit: 1.into(),
                pre_verification_gas: 55_000.into(),
                verification_gas_limit: 450_000.into(),
                call_gas_limit: 35_000.into(),
                max_fee_per_gas: None,
                max_priority_fee_per_gas: None,
            },
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn requests(&self) -> Vec<SponsorUserOperationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymasterApiServer for PaymasterMock {
    async fn sponsor_user_operation(
        &self,
        request: SponsorUserOperationRequest,
    ) -> RpcResult<SponsorUserOperationResult> {
        if request.user_op.signature.is_empty() {
            return Err(invalid_params("user operation without signature"));
        }
        self.requests.lock().unwrap().push(request);
        Ok(self.result.clone())
    }
}
