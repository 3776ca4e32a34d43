//! Utils for creating ethers providers

use ethers::providers::{Http, Middleware, Provider};
use std::time::Duration;
use tracing::debug;

/// Creates ethers provider with HTTP connection
///
/// The node is asked for its chain id once so that a wrong URL fails early.
pub async fn create_http_provider(
    addr: &str,
    poll_interval: Duration,
) -> eyre::Result<Provider<Http>> {
    let provider = Provider::<Http>::try_from(addr)?;

    let chain_id = provider.get_chainid().await?;
    debug!("Connected to node with chain id {chain_id}");

    Ok(provider.interval(poll_interval))
}
