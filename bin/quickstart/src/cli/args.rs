use crate::utils::{parse_duration, validate_private_key};
use alloy_chains::Chain;
use clap::Parser;
use expanded_pathbuf::ExpandedPathBuf;
use quickstart_primitives::{chain::parse_chain, constants::zerodev::DEFAULT_PROJECT_ID};
use quickstart_rpc::GasPriceSource;
use std::{str::FromStr, time::Duration};

/// Parses where the fees come from
pub fn parse_gas_price_source(s: &str) -> Result<GasPriceSource, String> {
    GasPriceSource::from_str(s)
}

/// Endpoints and client settings shared by the send commands
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct ClientArgs {
    /// Bundler RPC URL (defaults to the ZeroDev bundler of the project).
    #[clap(long)]
    pub bundler_url: Option<String>,

    /// Paymaster RPC URL (defaults to the ZeroDev paymaster of the project).
    #[clap(long)]
    pub paymaster_url: Option<String>,

    /// Ethereum execution client RPC endpoint.
    #[clap(long = "eth-client-address")]
    pub eth_client_address: Option<String>,

    /// Where the fees come from (zerodev or node).
    #[clap(long, default_value = "zerodev", value_parser=parse_gas_price_source)]
    pub gas_price_source: GasPriceSource,

    /// Interval between two receipt requests (in milliseconds).
    #[clap(long, default_value = "1000", value_parser=parse_duration)]
    pub poll_interval: Duration,
}

/// Counterfactual Kernel account CLI args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct SendArgs {
    /// ZeroDev project id.
    #[clap(long, default_value = DEFAULT_PROJECT_ID)]
    pub project_id: String,

    /// Chain (sepolia or base-sepolia).
    #[clap(long, default_value = "base-sepolia", value_parser=parse_chain)]
    pub chain: Chain,

    /// Private key of the account owner (a new key is generated when missing).
    #[clap(long, value_parser=validate_private_key)]
    pub private_key: Option<String>,

    /// Index of the account among the accounts of the owner.
    #[clap(long, default_value_t = 0)]
    pub index: u64,

    /// Time to wait for the user operation receipt (in milliseconds).
    #[clap(long, default_value = "15000", value_parser=parse_duration)]
    pub timeout: Duration,

    #[clap(flatten)]
    pub client: ClientArgs,
}

/// EIP-7702 delegated Kernel account CLI args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct Send7702Args {
    /// ZeroDev project id.
    #[clap(long, env = "PROJECT_ID")]
    pub project_id: String,

    /// Private key of the EOA delegating to Kernel.
    #[clap(long, env = "PRIVATE_KEY", hide_env_values = true, value_parser=validate_private_key)]
    pub private_key: String,

    /// Chain (sepolia or base-sepolia).
    #[clap(long, default_value = "sepolia", value_parser=parse_chain)]
    pub chain: Chain,

    /// Time to wait for the user operation receipt (in milliseconds).
    #[clap(long, default_value = "120000", value_parser=parse_duration)]
    pub timeout: Duration,

    #[clap(flatten)]
    pub client: ClientArgs,
}

/// Generate key CLI args
#[derive(Debug, Clone, Parser)]
pub struct GenerateKeyArgs {
    /// Store the key in a file named after the owner address.
    #[clap(long, default_value_t = false)]
    pub save: bool,

    /// The directory where the key will be stored (defaults to ~/.quickstart).
    #[clap(long, short)]
    pub output_path: Option<ExpandedPathBuf>,
}
