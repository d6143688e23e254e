//! Deploy a compiled Move package to a resource account derived from the
//! sender and a seed.
//!
//! ```text
//! CEDRA_PRIVATE_KEY=ed25519-priv-0x... \
//! CEDRA_NODE_URL=https://node.example/v1 \
//! cargo run -p cedra-tx --example deploy_package -- ./build/MyPackage [seed]
//! ```

use anyhow::{bail, Context};
use cedra_tx::deploy::{deployment_address, load_package};
use cedra_tx::{Account, CedraClient, Chain, ChainId, ClientConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(build_dir) = args.next() else {
        bail!("usage: deploy_package <package-build-dir> [seed]");
    };
    let seed = args.next().unwrap_or_default();

    let key = std::env::var("CEDRA_PRIVATE_KEY").context("CEDRA_PRIVATE_KEY not set")?;
    let node_url = std::env::var("CEDRA_NODE_URL").context("CEDRA_NODE_URL not set")?;

    let sender = Account::from_private_key_hex(&key)?;
    let client = CedraClient::connect(ClientConfig::new(Chain::new(ChainId::TESTNET, node_url)))?;

    let package = load_package(&build_dir)
        .with_context(|| format!("reading package from {}", build_dir))?;
    println!(
        "deploying {} modules to {}",
        package.modules.len(),
        deployment_address(sender.address(), seed.as_bytes())?
    );

    let raw = client
        .prepare(&sender, package.deploy_payload(sender.address(), seed.as_bytes()))
        .await?;
    let hash = client.sign_and_submit(&sender, &raw).await?;
    println!("submitted {}", hash);

    let outcome = client.await_execution(&hash, None).await?;
    println!("{:?}", outcome);
    Ok(())
}
