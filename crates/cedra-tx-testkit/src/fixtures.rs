//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use cedra_tx_core::{Account, AccountAddress, RawTransaction, StructTag, TransactionPayload};
use cedra_tx_node::memory::MemoryNode;

/// A test fixture with an account and an in-memory node.
pub struct TestFixture {
    pub account: Account,
    pub node: Arc<MemoryNode>,
}

impl TestFixture {
    /// Create a new test fixture with a random account.
    pub fn new() -> Self {
        Self {
            account: Account::generate(),
            node: Arc::new(MemoryNode::new()),
        }
    }

    /// Create with a deterministic account from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            account: Account::from_seed(&seed),
            node: Arc::new(MemoryNode::new()),
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.account.address()
    }

    /// Register the account on the node with the given next sequence number.
    pub async fn register(&self, sequence_number: u64) {
        self.node
            .set_sequence_number(self.account.address(), sequence_number)
            .await;
    }

    /// A transfer from this account with fixed gas settings.
    pub fn make_transfer(
        &self,
        sequence_number: u64,
        receiver: AccountAddress,
        amount: u64,
    ) -> RawTransaction {
        RawTransaction {
            sender: self.account.address(),
            sequence_number,
            payload: TransactionPayload::transfer(receiver, amount),
            max_gas_amount: 100_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: u64::MAX,
            chain_id: 4,
            fee_asset: StructTag::cedra_coin(),
        }
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create fixtures for multi-account tests. They share one node.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    let node = Arc::new(MemoryNode::new());
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            TestFixture {
                account: Account::from_seed(&seed),
                node: Arc::clone(&node),
            }
        })
        .collect()
}
