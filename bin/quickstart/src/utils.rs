use dirs::home_dir;
use ethers::{providers::Middleware, types::Address, utils::to_checksum};
use expanded_pathbuf::ExpandedPathBuf;
use pin_utils::pin_mut;
use quickstart_primitives::constants::zerodev::RPC_BASE_URL;
use std::{future::Future, io, time::Duration};
use tracing::info;

/// Unwrap path or returns home directory
pub fn unwrap_path_or_home(path: Option<ExpandedPathBuf>) -> eyre::Result<ExpandedPathBuf> {
    if let Some(path) = path {
        Ok(path)
    } else {
        home_dir()
            .map(|h| h.join(".quickstart"))
            .ok_or_else(|| eyre::eyre!("Get Home directory error"))
            .map(ExpandedPathBuf)
    }
}

/// Parses a duration given in milliseconds
pub fn parse_duration(duration: &str) -> Result<Duration, String> {
    let millis: u64 = duration.parse().map_err(|_| format!("{duration} must be unsigned int"))?;
    Ok(Duration::from_millis(millis))
}

/// Checks that the string is a 32 bytes hex private key (`0x` prefix optional)
pub fn validate_private_key(hex_string: &str) -> Result<String, String> {
    let key = hex_string.strip_prefix("0x").unwrap_or(hex_string);

    if key.chars().count() != 64 {
        return Err(format!("{hex_string} is not a valid private key"));
    }

    if !key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("{hex_string} is not a valid hexadecimal string"));
    }

    Ok(String::from(hex_string))
}

/// ZeroDev bundler endpoint of the project
pub fn bundler_url(project_id: &str) -> String {
    format!("{RPC_BASE_URL}/bundler/{project_id}")
}

/// ZeroDev paymaster endpoint of the project
///
/// A self-funded paymaster charges the gas to the project balance instead of a gas policy.
pub fn paymaster_url(project_id: &str, self_funded: bool) -> String {
    if self_funded {
        format!("{RPC_BASE_URL}/paymaster/{project_id}?selfFunded=true")
    } else {
        format!("{RPC_BASE_URL}/paymaster/{project_id}")
    }
}

pub fn checksum(address: Address) -> String {
    to_checksum(&address, None)
}

/// Fails when the node serves another chain than the one requested
pub async fn check_connected_chain<M: Middleware>(
    eth_client: &M,
    chain: alloy_chains::Chain,
) -> eyre::Result<()> {
    let chain_id = eth_client.get_chainid().await.map_err(|err| eyre::eyre!(err.to_string()))?;

    if chain_id.as_u64() != chain.id() {
        return Err(eyre::format_err!(
            "Tried to connect to the execution client of different chain: {} != {}",
            chain_id,
            chain.id()
        ));
    }

    Ok(())
}

/// Runs the future to completion or until:
/// - `ctrl-c` is received.
/// - `SIGTERM` is received (unix only).
///
/// An interrupted run is an error.
pub async fn run_until_ctrl_c<F, E>(fut: F) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
    E: Send + Sync + 'static + From<io::Error>,
{
    let mut stream = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let shutdown = async {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => "ctrl-c",
            _ = stream.recv() => "SIGTERM",
        }
    };

    run_until(fut, shutdown).await
}

async fn run_until<F, S, E>(fut: F, shutdown: S) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
    S: Future<Output = &'static str>,
    E: From<io::Error>,
{
    pin_mut!(fut, shutdown);

    tokio::select! {
        signal = shutdown => {
            info!("Received {signal} signal.");
            let reason = format!("interrupted by {signal}");
            Err(io::Error::new(io::ErrorKind::Interrupted, reason).into())
        },
        res = fut => res,
    }
}
