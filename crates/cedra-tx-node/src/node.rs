//! Node abstraction.
//!
//! The client only needs four calls from a node: the sender's sequence
//! number, a gas price estimate, transaction submission, and a blocking
//! status lookup. Implementations may talk HTTP or live in memory.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use cedra_tx_core::AccountAddress;

use crate::error::Result;
use crate::models::{GasEstimate, PendingTransaction, TransactionStatus};

/// Access to a Cedra full node.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Next sequence number of `address`.
    async fn sequence_number(&self, address: &AccountAddress) -> Result<u64>;

    /// Current gas unit price estimate.
    async fn estimate_gas_price(&self) -> Result<GasEstimate>;

    /// Submit canonically encoded signed-transaction bytes.
    ///
    /// Returns the hash the node assigned.
    async fn submit_transaction(&self, signed: Bytes) -> Result<PendingTransaction>;

    /// Look up a transaction by hash, waiting briefly server-side if it is
    /// still pending.
    async fn wait_by_hash(&self, hash: &str) -> Result<TransactionStatus>;
}

#[async_trait]
impl<N: NodeClient + ?Sized> NodeClient for Arc<N> {
    async fn sequence_number(&self, address: &AccountAddress) -> Result<u64> {
        (**self).sequence_number(address).await
    }

    async fn estimate_gas_price(&self) -> Result<GasEstimate> {
        (**self).estimate_gas_price().await
    }

    async fn submit_transaction(&self, signed: Bytes) -> Result<PendingTransaction> {
        (**self).submit_transaction(signed).await
    }

    async fn wait_by_hash(&self, hash: &str) -> Result<TransactionStatus> {
        (**self).wait_by_hash(hash).await
    }
}

/// An in-memory node for testing.
///
/// Tracks sequence numbers per account, accepts submissions whose sequence
/// number matches, and reports each accepted transaction as pending for a
/// configurable number of lookups before it commits.
pub mod memory {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;

    use cedra_tx_core::{transaction_hash, Decoder};
    use tokio::sync::Mutex;

    use crate::error::NodeError;
    use crate::models::{PENDING_TRANSACTION_TYPE, VM_STATUS_SUCCESS};

    /// Node operations, used to inject failures.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Operation {
        SequenceNumber,
        EstimateGasPrice,
        Submit,
        WaitByHash,
    }

    /// How accepted transactions finish.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Execution {
        /// Commit with [`VM_STATUS_SUCCESS`].
        Success,
        /// Commit with the given failure status.
        Abort(String),
        /// Never leave the mempool.
        Stuck,
    }

    #[derive(Debug)]
    struct Submitted {
        bytes: Bytes,
        polls_left: u32,
        execution: Execution,
    }

    #[derive(Debug)]
    struct State {
        sequence_numbers: HashMap<AccountAddress, u64>,
        gas_price: u64,
        failing: HashSet<Operation>,
        execution: Execution,
        pending_polls: u32,
        latency: Duration,
        transactions: HashMap<String, Submitted>,
        order: Vec<String>,
    }

    /// In-memory [`NodeClient`].
    pub struct MemoryNode {
        state: Mutex<State>,
    }

    impl MemoryNode {
        /// A node with gas price 100 that executes everything successfully
        /// on the first lookup.
        pub fn new() -> Self {
            Self {
                state: Mutex::new(State {
                    sequence_numbers: HashMap::new(),
                    gas_price: 100,
                    failing: HashSet::new(),
                    execution: Execution::Success,
                    pending_polls: 0,
                    latency: Duration::ZERO,
                    transactions: HashMap::new(),
                    order: Vec::new(),
                }),
            }
        }

        /// Create or overwrite an account's next sequence number.
        pub async fn set_sequence_number(&self, address: AccountAddress, sequence_number: u64) {
            self.state
                .lock()
                .await
                .sequence_numbers
                .insert(address, sequence_number);
        }

        pub async fn set_gas_price(&self, price: u64) {
            self.state.lock().await.gas_price = price;
        }

        /// Make `op` fail with [`NodeError::Unavailable`] until cleared.
        pub async fn fail(&self, op: Operation) {
            self.state.lock().await.failing.insert(op);
        }

        pub async fn clear_failures(&self) {
            self.state.lock().await.failing.clear();
        }

        /// Outcome for transactions submitted from now on.
        pub async fn set_execution(&self, execution: Execution) {
            self.state.lock().await.execution = execution;
        }

        /// Number of lookups that report "pending" before a transaction commits.
        pub async fn set_pending_polls(&self, polls: u32) {
            self.state.lock().await.pending_polls = polls;
        }

        /// Delay applied to every call.
        pub async fn set_latency(&self, latency: Duration) {
            self.state.lock().await.latency = latency;
        }

        /// Bytes of every accepted submission, oldest first.
        pub async fn submitted(&self) -> Vec<Bytes> {
            let state = self.state.lock().await;
            state
                .order
                .iter()
                .filter_map(|hash| state.transactions.get(hash))
                .map(|tx| tx.bytes.clone())
                .collect()
        }

        /// Enter a call: apply latency, then fail if `op` is marked failing.
        async fn enter(&self, op: Operation) -> Result<()> {
            let latency = self.state.lock().await.latency;
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            if self.state.lock().await.failing.contains(&op) {
                return Err(NodeError::Unavailable(format!("{:?} failed", op)));
            }
            Ok(())
        }
    }

    impl Default for MemoryNode {
        fn default() -> Self {
            Self::new()
        }
    }

    /// The first two fields of an encoded raw transaction.
    fn sender_and_sequence(bytes: &[u8]) -> cedra_tx_core::Result<(AccountAddress, u64)> {
        let mut dec = Decoder::new(bytes);
        let sender = AccountAddress::from_bytes(dec.read_array::<32>()?);
        Ok((sender, dec.read_u64()?))
    }

    #[async_trait]
    impl NodeClient for MemoryNode {
        async fn sequence_number(&self, address: &AccountAddress) -> Result<u64> {
            self.enter(Operation::SequenceNumber).await?;
            let state = self.state.lock().await;
            state
                .sequence_numbers
                .get(address)
                .copied()
                .ok_or_else(|| NodeError::Status {
                    status: 404,
                    body: format!("account {} not found", address),
                })
        }

        async fn estimate_gas_price(&self) -> Result<GasEstimate> {
            self.enter(Operation::EstimateGasPrice).await?;
            let price = self.state.lock().await.gas_price;
            Ok(GasEstimate {
                gas_estimate: price,
                prioritized_gas_estimate: Some(price.saturating_mul(2)),
                deprioritized_gas_estimate: Some(price / 2),
            })
        }

        async fn submit_transaction(&self, signed: Bytes) -> Result<PendingTransaction> {
            self.enter(Operation::Submit).await?;

            let (sender, sequence_number) =
                sender_and_sequence(&signed).map_err(|e| NodeError::Status {
                    status: 400,
                    body: format!("malformed transaction: {}", e),
                })?;

            let mut state = self.state.lock().await;
            let expected = state.sequence_numbers.get(&sender).copied().unwrap_or(0);
            if sequence_number != expected {
                return Err(NodeError::Status {
                    status: 400,
                    body: format!(
                        "SEQUENCE_NUMBER_MISMATCH: expected {}, got {}",
                        expected, sequence_number
                    ),
                });
            }
            state.sequence_numbers.insert(sender, expected + 1);

            let hash = transaction_hash(&signed);
            let submitted = Submitted {
                bytes: signed,
                polls_left: state.pending_polls,
                execution: state.execution.clone(),
            };
            state.transactions.insert(hash.clone(), submitted);
            state.order.push(hash.clone());

            Ok(PendingTransaction { hash })
        }

        async fn wait_by_hash(&self, hash: &str) -> Result<TransactionStatus> {
            self.enter(Operation::WaitByHash).await?;

            let mut state = self.state.lock().await;
            let tx = state
                .transactions
                .get_mut(hash)
                .ok_or_else(|| NodeError::Status {
                    status: 404,
                    body: format!("transaction {} not found", hash),
                })?;

            let pending = TransactionStatus {
                hash: hash.to_string(),
                kind: PENDING_TRANSACTION_TYPE.to_string(),
                vm_status: String::new(),
                success: None,
            };
            if tx.polls_left > 0 {
                tx.polls_left -= 1;
                return Ok(pending);
            }

            let (vm_status, success) = match &tx.execution {
                Execution::Success => (VM_STATUS_SUCCESS.to_string(), true),
                Execution::Abort(status) => (status.clone(), false),
                Execution::Stuck => return Ok(pending),
            };
            Ok(TransactionStatus {
                hash: hash.to_string(),
                kind: "user_transaction".to_string(),
                vm_status,
                success: Some(success),
            })
        }
    }
}
