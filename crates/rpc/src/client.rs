use crate::{
    bundler_api::{BundlerApiClient, ZeroDevBundlerApiClient},
    error::ClientError,
    paymaster_api::PaymasterApiClient,
};
use ethers::providers::Middleware;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use quickstart_account::{Call, SmartAccount};
use quickstart_primitives::{
    constants::receipt::POLL_INTERVAL, GasPrice, SponsorUserOperationRequest, UserOperationHash,
    UserOperationReceipt, UserOperationRequest, UserOperationSigned,
};
use std::{fmt, str::FromStr, sync::Arc, time::Duration};
use tracing::{debug, info, trace};

/// Where the fees of the user operation come from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GasPriceSource {
    /// Standard tier of `zd_getUserOperationGasPrice`
    #[default]
    ZeroDev,
    /// EIP-1559 estimate of the node
    Node,
}

impl FromStr for GasPriceSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zerodev" => Ok(Self::ZeroDev),
            "node" => Ok(Self::Node),
            other => Err(format!("unknown gas price source {other}, expected zerodev or node")),
        }
    }
}

impl fmt::Display for GasPriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDev => write!(f, "zerodev"),
            Self::Node => write!(f, "node"),
        }
    }
}

/// Creates a JSON-RPC client for a bundler or paymaster URL
pub fn build_http_client(url: &str) -> Result<HttpClient, jsonrpsee::core::ClientError> {
    HttpClientBuilder::default().build(url)
}

/// Smart account client submitting user operations through a bundler, sponsored by a paymaster
/// when one is set
pub struct KernelAccountClient<A, M> {
    account: A,
    eth_client: Arc<M>,
    bundler: HttpClient,
    paymaster: Option<HttpClient>,
    gas_price_source: GasPriceSource,
    poll_interval: Duration,
}

impl<A, M> KernelAccountClient<A, M>
where
    A: SmartAccount,
    M: Middleware + 'static,
{
    pub fn new(account: A, eth_client: Arc<M>, bundler: HttpClient) -> Self {
        Self {
            account,
            eth_client,
            bundler,
            paymaster: None,
            gas_price_source: GasPriceSource::default(),
            poll_interval: Duration::from_millis(POLL_INTERVAL),
        }
    }

    pub fn with_paymaster(mut self, paymaster: HttpClient) -> Self {
        self.paymaster = Some(paymaster);
        self
    }

    pub fn with_gas_price_source(mut self, gas_price_source: GasPriceSource) -> Self {
        self.gas_price_source = gas_price_source;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn account(&self) -> &A {
        &self.account
    }

    /// Checks that the bundler serves the chain and the entry point of the account
    pub async fn check_bundler(&self) -> Result<(), ClientError> {
        let chain_id = BundlerApiClient::chain_id(&self.bundler)
            .await
            .map_err(ClientError::Bundler)?
            .as_u64();
        if chain_id != self.account.chain_id() {
            return Err(ClientError::ChainMismatch {
                bundler: chain_id,
                account: self.account.chain_id(),
            });
        }

        let entry_points =
            self.bundler.supported_entry_points().await.map_err(ClientError::Bundler)?;
        let entry_point = self.account.entry_point();
        if !entry_points.contains(&entry_point) {
            return Err(ClientError::UnsupportedEntryPoint(entry_point));
        }

        Ok(())
    }

    /// Fees for the next user operation
    pub async fn gas_price(&self) -> Result<GasPrice, ClientError> {
        match self.gas_price_source {
            GasPriceSource::ZeroDev => {
                let prices = self
                    .bundler
                    .get_user_operation_gas_price()
                    .await
                    .map_err(ClientError::Bundler)?;
                Ok(prices.standard)
            }
            GasPriceSource::Node => {
                let (max_fee_per_gas, max_priority_fee_per_gas) = self
                    .eth_client
                    .estimate_eip1559_fees(None)
                    .await
                    .map_err(|err| ClientError::Node { inner: err.to_string() })?;
                Ok(GasPrice { max_fee_per_gas, max_priority_fee_per_gas })
            }
        }
    }

    /// Builds the unsigned user operation executing `calls`, with gas limits filled in
    pub async fn prepare_user_operation(
        &self,
        calls: &[Call],
    ) -> Result<UserOperationSigned, ClientError> {
        let call_data = self.account.encode_calls(calls)?;
        let nonce = self.account.get_nonce().await?;
        let gas_price = self.gas_price().await?;

        let mut uo = UserOperationSigned::default()
            .sender(self.account.address())
            .nonce(nonce)
            .call_data(call_data)
            .max_fee_per_gas(gas_price.max_fee_per_gas)
            .max_priority_fee_per_gas(gas_price.max_priority_fee_per_gas)
            .signature(self.account.dummy_signature());

        if let Some((factory, factory_data)) = self.account.factory_args().await? {
            debug!("Account not deployed yet, deploying through {factory:?}");
            uo = uo.factory(factory, factory_data);
        }
        if let Some(authorization) = self.account.authorization().await? {
            uo = uo.eip7702_auth(authorization);
        }

        if self.paymaster.is_some() {
            self.sponsor_user_operation(uo).await
        } else {
            self.estimate_user_operation_gas(uo).await
        }
    }

    /// Lets the paymaster fill the gas limits and the paymaster fields
    pub async fn sponsor_user_operation(
        &self,
        uo: UserOperationSigned,
    ) -> Result<UserOperationSigned, ClientError> {
        let paymaster = self.paymaster.as_ref().ok_or(ClientError::NoPaymaster)?;

        let request = SponsorUserOperationRequest::new(
            self.account.chain_id(),
            uo.clone(),
            self.account.entry_point(),
        );
        let result =
            paymaster.sponsor_user_operation(request).await.map_err(ClientError::Paymaster)?;
        debug!("User operation sponsored by {:?}", result.paymaster);

        Ok(result.apply(uo))
    }

    /// Asks the bundler for the gas limits of the user operation
    pub async fn estimate_user_operation_gas(
        &self,
        uo: UserOperationSigned,
    ) -> Result<UserOperationSigned, ClientError> {
        let estimation = self
            .bundler
            .estimate_user_operation_gas(uo.clone().into(), self.account.entry_point())
            .await
            .map_err(ClientError::Bundler)?;
        debug!("Gas estimation {estimation:?}");

        let mut uo = uo
            .call_gas_limit(estimation.call_gas_limit)
            .verification_gas_limit(estimation.verification_gas_limit)
            .pre_verification_gas(estimation.pre_verification_gas);

        if let Some(paymaster) = uo.paymaster {
            let paymaster_verification_gas_limit = estimation
                .paymaster_verification_gas_limit
                .unwrap_or(uo.paymaster_verification_gas_limit);
            let paymaster_post_op_gas_limit =
                estimation.paymaster_post_op_gas_limit.unwrap_or(uo.paymaster_post_op_gas_limit);
            let paymaster_data = uo.paymaster_data.clone();
            uo = uo.paymaster(
                paymaster,
                paymaster_verification_gas_limit,
                paymaster_post_op_gas_limit,
                paymaster_data,
            );
        }

        Ok(uo)
    }

    /// Prepares, signs and submits a user operation executing `calls`
    pub async fn send_user_operation(
        &self,
        calls: &[Call],
    ) -> Result<UserOperationHash, ClientError> {
        let uo = self.prepare_user_operation(calls).await?;
        let signature = self.account.sign_user_operation(&uo).await?;
        let uo = uo.signature(signature);

        let request: UserOperationRequest = uo.into();
        let hash = self
            .bundler
            .send_user_operation(request, self.account.entry_point())
            .await
            .map_err(ClientError::Bundler)?;
        info!("User operation {hash} sent from {:?}", self.account.address());

        Ok(hash)
    }

    /// Polls the bundler until the user operation is included or `timeout` elapses
    pub async fn wait_for_user_operation_receipt(
        &self,
        hash: UserOperationHash,
        timeout: Duration,
    ) -> Result<UserOperationReceipt, ClientError> {
        let poll = async {
            let mut interval = tokio::time::interval(self.poll_interval);
            loop {
                interval.tick().await;
                match self.bundler.get_user_operation_receipt(hash).await {
                    Ok(Some(receipt)) => return Ok(receipt),
                    Ok(None) => trace!("User operation {hash} not included yet"),
                    Err(err) => return Err(ClientError::Bundler(err)),
                }
            }
        };

        match tokio::time::timeout(timeout, poll).await {
            Ok(receipt) => receipt,
            Err(_) => Err(ClientError::Timeout { hash, timeout }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_price_source() {
        assert_eq!("zerodev".parse::<GasPriceSource>().unwrap(), GasPriceSource::ZeroDev);
        assert_eq!("Node".parse::<GasPriceSource>().unwrap(), GasPriceSource::Node);
        assert!("alchemy".parse::<GasPriceSource>().is_err());
        assert_eq!(GasPriceSource::default().to_string(), "zerodev");
    }
}
