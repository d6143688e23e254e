//! Chain and client configuration.
//!
//! Configuration is an immutable value handed to the client at
//! construction. There is no global chain table.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use cedra_tx_core::StructTag;
use cedra_tx_node::http::DEFAULT_HTTP_TIMEOUT;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Default gas limit per transaction.
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 100_000;

/// Default lifetime of a prepared transaction.
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(300);

/// Default delay between status lookups.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default deadline for [`CedraClient::await_execution`](crate::CedraClient::await_execution).
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(15);

/// One-byte network identifier, signed into every transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ChainId(u8);

impl ChainId {
    pub const MAINNET: Self = Self(1);
    pub const TESTNET: Self = Self(2);
    pub const DEVNET: Self = Self(3);

    /// A local network's chain id. Zero is reserved.
    pub fn localnet(id: u8) -> Result<Self> {
        if id == 0 {
            return Err(ClientError::InvalidConfig(
                "chain id 0 is reserved".to_string(),
            ));
        }
        Ok(Self(id))
    }

    pub const fn id(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ChainId {
    type Error = ClientError;

    fn try_from(id: u8) -> Result<Self> {
        Self::localnet(id)
    }
}

impl From<ChainId> for u8 {
    fn from(chain_id: ChainId) -> Self {
        chain_id.0
    }
}

impl fmt::Debug for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainId({})", self.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MAINNET => write!(f, "mainnet"),
            Self::TESTNET => write!(f, "testnet"),
            Self::DEVNET => write!(f, "devnet"),
            Self(id) => write!(f, "localnet({})", id),
        }
    }
}

/// A network and the node serving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub chain_id: ChainId,
    pub node_url: String,
}

impl Chain {
    pub fn new(chain_id: ChainId, node_url: impl Into<String>) -> Self {
        Self {
            chain_id,
            node_url: node_url.into(),
        }
    }
}

/// Known chains, keyed by id.
///
/// Serialized as a JSON array of [`Chain`] objects. Each chain id may
/// appear once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Chain>", into = "Vec<Chain>")]
pub struct ChainConfig {
    chains: BTreeMap<ChainId, Chain>,
}

impl ChainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a chain.
    pub fn with_chain(mut self, chain: Chain) -> Self {
        self.chains.insert(chain.chain_id, chain);
        self
    }

    pub fn get(&self, chain_id: ChainId) -> Result<&Chain> {
        self.chains
            .get(&chain_id)
            .ok_or(ClientError::UnknownChain(chain_id))
    }

    /// Parse `[{"chain_id": 2, "node_url": "..."}, ...]`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ClientError::InvalidConfig(e.to_string()))
    }

    pub fn chains(&self) -> impl Iterator<Item = &Chain> {
        self.chains.values()
    }
}

impl TryFrom<Vec<Chain>> for ChainConfig {
    type Error = ClientError;

    fn try_from(chains: Vec<Chain>) -> Result<Self> {
        let mut config = Self::default();
        for chain in chains {
            if config.chains.contains_key(&chain.chain_id) {
                return Err(ClientError::InvalidConfig(format!(
                    "chain id {} listed more than once",
                    chain.chain_id.id()
                )));
            }
            config.chains.insert(chain.chain_id, chain);
        }
        Ok(config)
    }
}

impl From<ChainConfig> for Vec<Chain> {
    fn from(config: ChainConfig) -> Self {
        config.chains.into_values().collect()
    }
}

/// Configuration for [`CedraClient`](crate::CedraClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Target network.
    pub chain: Chain,
    /// Gas limit written into prepared transactions.
    pub max_gas_amount: u64,
    /// Prepared transactions expire this long after `prepare`.
    pub expiration: Duration,
    /// Asset fees are paid in.
    pub fee_asset: StructTag,
    /// Delay between status lookups while awaiting execution.
    pub poll_interval: Duration,
    /// Default deadline for awaiting execution.
    pub confirmation_timeout: Duration,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
}

impl ClientConfig {
    /// Defaults for `chain`.
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            expiration: DEFAULT_EXPIRATION,
            fee_asset: StructTag::cedra_coin(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    /// Defaults for the chain `chain_id` in `chains`.
    pub fn from_chain_config(chains: &ChainConfig, chain_id: ChainId) -> Result<Self> {
        Ok(Self::new(chains.get(chain_id)?.clone()))
    }

    /// Reject values the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.chain.chain_id.id() == 0 {
            return Err(ClientError::InvalidConfig(
                "chain id 0 is reserved".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(ClientError::InvalidConfig(
                "poll_interval must be non-zero".to_string(),
            ));
        }
        if self.max_gas_amount == 0 {
            return Err(ClientError::InvalidConfig(
                "max_gas_amount must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
