//! Transfer native coin to another account and wait for execution.
//!
//! ```text
//! CEDRA_PRIVATE_KEY=ed25519-priv-0x... \
//! CEDRA_NODE_URL=https://node.example/v1 \
//! cargo run -p cedra-tx --example transfer -- 0xc745... 100000000
//! ```

use anyhow::{bail, Context};
use cedra_tx::{Account, AccountAddress, CedraClient, Chain, ChainId, ClientConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(receiver), Some(amount)) = (args.next(), args.next()) else {
        bail!("usage: transfer <receiver-address> <amount>");
    };
    let receiver = AccountAddress::from_hex(&receiver)?;
    let amount: u64 = amount.parse().context("amount must be a u64")?;

    let key = std::env::var("CEDRA_PRIVATE_KEY").context("CEDRA_PRIVATE_KEY not set")?;
    let node_url = std::env::var("CEDRA_NODE_URL").context("CEDRA_NODE_URL not set")?;

    let sender = Account::from_private_key_hex(&key)?;
    let client = CedraClient::connect(ClientConfig::new(Chain::new(ChainId::TESTNET, node_url)))?;

    let hash = client.transfer(&sender, receiver, amount).await?;
    println!("submitted {}", hash);

    let outcome = client.await_execution(&hash, None).await?;
    println!("{:?}", outcome);
    Ok(())
}
