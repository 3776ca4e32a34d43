use crate::{
    cli::args::{ClientArgs, GenerateKeyArgs, Send7702Args, SendArgs},
    utils::{bundler_url, check_connected_chain, checksum, paymaster_url, unwrap_path_or_home},
};
use ethers::providers::{Http, Provider};
use quickstart_account::{
    sign_authorization, Call, EcdsaValidator, KernelAccount, SmartAccount, ACCOUNT_IMPLEMENTATION,
};
use quickstart_primitives::{chain::ChainExt, provider::create_http_provider, Wallet};
use quickstart_rpc::{build_http_client, KernelAccountClient};
use std::{fs, sync::Arc};
use tracing::info;

/// Wires the account to the bundler and paymaster endpoints
fn build_client<A: SmartAccount>(
    account: A,
    eth_client: Arc<Provider<Http>>,
    bundler_url: &str,
    paymaster_url: &str,
    args: &ClientArgs,
) -> eyre::Result<KernelAccountClient<A, Provider<Http>>> {
    Ok(KernelAccountClient::new(account, eth_client, build_http_client(bundler_url)?)
        .with_paymaster(build_http_client(paymaster_url)?)
        .with_gas_price_source(args.gas_price_source)
        .with_poll_interval(args.poll_interval))
}

/// Sends one zero-value call from a counterfactual Kernel account, deploying it on the way
pub async fn send(args: SendArgs) -> eyre::Result<()> {
    let wallet = match args.private_key {
        Some(ref key) => Wallet::from_private_key(key)?,
        None => Wallet::build_random(),
    };

    let bundler_rpc =
        args.client.bundler_url.clone().unwrap_or_else(|| bundler_url(&args.project_id));
    let paymaster_rpc =
        args.client.paymaster_url.clone().unwrap_or_else(|| paymaster_url(&args.project_id, false));
    // the bundler endpoint also serves the node methods
    let node_rpc = args.client.eth_client_address.clone().unwrap_or_else(|| bundler_rpc.clone());

    let eth_client = Arc::new(create_http_provider(&node_rpc, args.client.poll_interval).await?);
    check_connected_chain(eth_client.as_ref(), args.chain).await?;

    let account =
        KernelAccount::new(eth_client.clone(), EcdsaValidator::new(wallet), args.index).await?;
    let client = build_client(account, eth_client, &bundler_rpc, &paymaster_rpc, &args.client)?;
    client.check_bundler().await?;

    println!("My account: {}", checksum(client.account().address()));

    let hash = client.send_user_operation(&[Call::default()]).await?;
    println!("UserOp hash: {hash}");
    println!("Waiting for UserOp to complete...");

    client.wait_for_user_operation_receipt(hash, args.timeout).await?;
    println!("UserOp completed: {}", args.chain.user_operation_url(&hash.to_string())?);

    Ok(())
}

/// Delegates the EOA to the Kernel implementation and sends two zero-value calls from it
pub async fn send_7702(args: Send7702Args) -> eyre::Result<()> {
    let wallet = Wallet::from_private_key(&args.private_key)?;
    println!("EOA Address: {}", checksum(wallet.address()));

    let bundler_rpc =
        args.client.bundler_url.clone().unwrap_or_else(|| bundler_url(&args.project_id));
    let paymaster_rpc =
        args.client.paymaster_url.clone().unwrap_or_else(|| paymaster_url(&args.project_id, true));
    let node_rpc = match args.client.eth_client_address.clone() {
        Some(url) => url,
        None => args.chain.public_rpc_url()?.to_string(),
    };

    let eth_client = Arc::new(create_http_provider(&node_rpc, args.client.poll_interval).await?);
    check_connected_chain(eth_client.as_ref(), args.chain).await?;

    let authorization =
        sign_authorization(eth_client.as_ref(), &wallet, *ACCOUNT_IMPLEMENTATION).await?;
    println!("Authorization: {}", serde_json::to_string_pretty(&authorization)?);

    let account =
        KernelAccount::new_7702(eth_client.clone(), EcdsaValidator::new(wallet), authorization)
            .await?;
    let client = build_client(account, eth_client, &bundler_rpc, &paymaster_rpc, &args.client)?;
    client.check_bundler().await?;

    println!("KernelClient Address: {}", checksum(client.account().address()));

    let hash = client.send_user_operation(&[Call::default(), Call::default()]).await?;
    info!("Waiting for user operation {hash}");

    let receipt = client.wait_for_user_operation_receipt(hash, args.timeout).await?;
    let tx_hash = format!("{:?}", receipt.tx_receipt.transaction_hash);
    println!("UserOp completed {}", args.chain.transaction_url(&tx_hash)?);

    Ok(())
}

/// Prints a fresh owner key, storing it when asked to
pub fn generate_key(args: GenerateKeyArgs) -> eyre::Result<()> {
    let wallet = Wallet::build_random();
    let address = checksum(wallet.address());

    println!("Address: {address}");
    println!("Private key: {}", wallet.private_key_hex());

    if args.save {
        let dir = unwrap_path_or_home(args.output_path)?;
        fs::create_dir_all(&dir.0)?;
        let path = dir.0.join(&address);
        fs::write(&path, wallet.private_key_hex())?;
        info!("Key stored in {path:?}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use expanded_pathbuf::ExpandedPathBuf;

    #[test]
    fn generate_and_store_key() {
        let dir = tempfile::tempdir().unwrap();
        let args = GenerateKeyArgs {
            save: true,
            output_path: Some(ExpandedPathBuf(dir.path().to_path_buf())),
        };
        generate_key(args).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap()).collect();
        assert_eq!(entries.len(), 1);

        let key = fs::read_to_string(entries[0].path()).unwrap();
        let wallet = Wallet::from_private_key(&key).unwrap();
        assert_eq!(entries[0].file_name().to_string_lossy(), checksum(wallet.address()));
    }
}
