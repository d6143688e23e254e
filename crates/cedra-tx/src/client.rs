//! Transaction submission orchestrator.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use cedra_tx_core::{Account, AccountAddress, RawTransaction, SignedTransaction, TransactionPayload};
use cedra_tx_node::{HttpNode, NodeClient};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// How a committed transaction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Executed successfully.
    Confirmed,
    /// Committed, but execution failed with `vm_status`.
    Failed { vm_status: String },
}

impl ExecutionOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ExecutionOutcome::Confirmed)
    }
}

/// Builds, submits, and confirms transactions against one chain.
///
/// Provides:
/// - Preparing transactions (sequence number and gas price looked up concurrently)
/// - Signing and submitting
/// - Awaiting execution with a deadline
pub struct CedraClient<N: NodeClient = HttpNode> {
    node: N,
    config: ClientConfig,
}

impl CedraClient<HttpNode> {
    /// Connect over HTTP to the configured chain's node.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let node = HttpNode::with_timeout(&config.chain.node_url, config.http_timeout)
            .map_err(ClientError::Node)?;
        Self::new(node, config)
    }
}

impl<N: NodeClient> CedraClient<N> {
    /// Create a client over any node implementation.
    pub fn new(node: N, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { node, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preparation
    // ─────────────────────────────────────────────────────────────────────────

    /// Build an unsigned transaction for `payload` sent by `account`.
    ///
    /// The sequence number and gas price are fetched concurrently. A missing
    /// sequence number aborts; a missing gas estimate is logged and the gas
    /// unit price falls back to 0.
    pub async fn prepare(
        &self,
        account: &Account,
        payload: TransactionPayload,
    ) -> Result<RawTransaction> {
        let sender = account.address();

        let (sequence_number, gas_unit_price) =
            tokio::join!(self.fetch_sequence_number(&sender), self.fetch_gas_price());

        let sequence_number = sequence_number?;
        let gas_unit_price = gas_unit_price.unwrap_or_else(|e| {
            warn!(error = %e, "gas estimate unavailable, using gas unit price 0");
            0
        });

        let expiration_timestamp_secs = expiration_after(SystemTime::now(), self.config.expiration)?;

        info!(
            %sender,
            sequence_number,
            gas_unit_price,
            expiration_timestamp_secs,
            "prepared transaction"
        );

        Ok(RawTransaction {
            sender,
            sequence_number,
            payload,
            max_gas_amount: self.config.max_gas_amount,
            gas_unit_price,
            expiration_timestamp_secs,
            chain_id: self.config.chain.chain_id.id(),
            fee_asset: self.config.fee_asset.clone(),
        })
    }

    async fn fetch_sequence_number(&self, sender: &AccountAddress) -> Result<u64> {
        debug!(%sender, "fetching sequence number");
        self.node
            .sequence_number(sender)
            .await
            .map_err(ClientError::SequenceFetchFailed)
    }

    async fn fetch_gas_price(&self) -> Result<u64> {
        debug!("fetching gas estimate");
        self.node
            .estimate_gas_price()
            .await
            .map(|estimate| estimate.gas_estimate)
            .map_err(ClientError::GasEstimateFailed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit a signed transaction. Returns the node's hash for it.
    pub async fn submit(&self, signed: &SignedTransaction) -> Result<String> {
        let pending = self
            .node
            .submit_transaction(Bytes::from(signed.to_bytes()))
            .await
            .map_err(ClientError::SubmissionFailed)?;

        info!(hash = %pending.hash, "submitted transaction");
        Ok(pending.hash)
    }

    /// Sign `raw` with `account` and submit it.
    pub async fn sign_and_submit(&self, account: &Account, raw: &RawTransaction) -> Result<String> {
        let signed = raw.sign(account)?;
        self.submit(&signed).await
    }

    /// Transfer `amount` of the native coin from `account` to `receiver`.
    pub async fn transfer(
        &self,
        account: &Account,
        receiver: AccountAddress,
        amount: u64,
    ) -> Result<String> {
        let raw = self
            .prepare(account, TransactionPayload::transfer(receiver, amount))
            .await?;
        self.sign_and_submit(account, &raw).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Confirmation
    // ─────────────────────────────────────────────────────────────────────────

    /// Poll the node until `hash` is committed or `timeout` passes
    /// (default: the configured confirmation timeout).
    pub async fn await_execution(
        &self,
        hash: &str,
        timeout: Option<Duration>,
    ) -> Result<ExecutionOutcome> {
        let timeout = timeout.unwrap_or(self.config.confirmation_timeout);

        match tokio::time::timeout(timeout, self.poll_until_committed(hash)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(%hash, ?timeout, "transaction not confirmed before deadline");
                Err(ClientError::ConfirmationTimeout {
                    hash: hash.to_string(),
                    timeout,
                })
            }
        }
    }

    async fn poll_until_committed(&self, hash: &str) -> Result<ExecutionOutcome> {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let status = self
                .node
                .wait_by_hash(hash)
                .await
                .map_err(ClientError::ConfirmationFailed)?;

            if status.is_pending() {
                debug!(%hash, "transaction pending");
                continue;
            }

            if status.is_executed() {
                info!(%hash, "transaction confirmed");
                return Ok(ExecutionOutcome::Confirmed);
            }

            warn!(%hash, vm_status = %status.vm_status, "transaction failed");
            return Ok(ExecutionOutcome::Failed {
                vm_status: status.vm_status,
            });
        }
    }
}

/// Unix seconds `lifetime` after `now`. A clock before the epoch is an error.
fn expiration_after(now: SystemTime, lifetime: Duration) -> Result<u64> {
    let since_epoch = now.duration_since(UNIX_EPOCH).map_err(|e| {
        ClientError::InvalidConfig(format!(
            "system clock is {:?} before the Unix epoch",
            e.duration()
        ))
    })?;
    Ok(since_epoch.as_secs().saturating_add(lifetime.as_secs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Chain, ChainId};
    use cedra_tx_node::memory::{Execution, MemoryNode, Operation};
    use std::sync::Arc;

    fn now_secs() -> u64 {
        expiration_after(SystemTime::now(), Duration::ZERO).unwrap()
    }

    fn setup() -> (Arc<MemoryNode>, CedraClient<Arc<MemoryNode>>, Account) {
        let node = Arc::new(MemoryNode::new());
        let mut config = ClientConfig::new(Chain::new(ChainId::TESTNET, "http://memory/v1"));
        config.poll_interval = Duration::from_millis(5);
        let client = CedraClient::new(Arc::clone(&node), config).unwrap();
        (node, client, Account::from_seed(&[0x42; 32]))
    }

    #[tokio::test]
    async fn test_prepare_fills_every_field() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 5).await;
        node.set_gas_price(150).await;

        let before = now_secs();
        let raw = client
            .prepare(&account, TransactionPayload::transfer(AccountAddress::ONE, 1))
            .await
            .unwrap();

        assert_eq!(raw.sender, account.address());
        assert_eq!(raw.sequence_number, 5);
        assert_eq!(raw.gas_unit_price, 150);
        assert_eq!(raw.max_gas_amount, 100_000);
        assert_eq!(raw.chain_id, 2);
        assert!(raw.expiration_timestamp_secs >= before + 300);
        assert!(raw.expiration_timestamp_secs <= now_secs() + 300);
    }

    #[tokio::test]
    async fn test_gas_failure_falls_back_to_zero() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 1).await;
        node.fail(Operation::EstimateGasPrice).await;

        let raw = client
            .prepare(&account, TransactionPayload::transfer(AccountAddress::ONE, 1))
            .await
            .unwrap();
        assert_eq!(raw.gas_unit_price, 0);
        assert_eq!(raw.sequence_number, 1);
    }

    #[tokio::test]
    async fn test_sequence_failure_aborts() {
        let (node, client, account) = setup();
        node.fail(Operation::SequenceNumber).await;

        let err = client
            .prepare(&account, TransactionPayload::transfer(AccountAddress::ONE, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::SequenceFetchFailed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookups_run_concurrently() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 0).await;
        node.set_latency(Duration::from_millis(200)).await;

        let start = tokio::time::Instant::now();
        client
            .prepare(&account, TransactionPayload::transfer(AccountAddress::ONE, 1))
            .await
            .unwrap();
        // Sequential lookups would take 400ms of virtual time.
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[test]
    fn test_expiration_after_epoch() {
        let now = UNIX_EPOCH + Duration::from_secs(1_736_870_400);
        assert_eq!(
            expiration_after(now, Duration::from_secs(300)).unwrap(),
            1_736_870_700
        );
    }

    #[test]
    fn test_clock_before_epoch_is_rejected() {
        let now = UNIX_EPOCH - Duration::from_secs(5);
        let err = expiration_after(now, Duration::from_secs(300)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig(_)));
        assert!(err.to_string().contains("before the Unix epoch"));
    }

    #[tokio::test]
    async fn test_transfer_then_confirm() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 0).await;
        node.set_pending_polls(3).await;

        let hash = client
            .transfer(&account, AccountAddress::from_bytes([0x11; 32]), 1_000)
            .await
            .unwrap();

        let outcome = client.await_execution(&hash, None).await.unwrap();
        assert!(outcome.is_confirmed());
        assert_eq!(node.submitted().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submitted_hash_matches_local_hash() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 0).await;

        let raw = client
            .prepare(&account, TransactionPayload::transfer(AccountAddress::ONE, 7))
            .await
            .unwrap();
        let signed = raw.sign(&account).unwrap();
        let hash = client.submit(&signed).await.unwrap();

        assert_eq!(hash, signed.hash());
        assert_eq!(node.submitted().await[0].as_ref(), signed.to_bytes().as_slice());
    }

    #[tokio::test]
    async fn test_failed_execution() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 0).await;
        node.set_execution(Execution::Abort("Move abort: EINSUFFICIENT_BALANCE".into()))
            .await;

        let hash = client
            .transfer(&account, AccountAddress::ONE, u64::MAX)
            .await
            .unwrap();
        let outcome = client.await_execution(&hash, None).await.unwrap();

        assert!(!outcome.is_confirmed());
        assert_eq!(
            outcome,
            ExecutionOutcome::Failed {
                vm_status: "Move abort: EINSUFFICIENT_BALANCE".into()
            }
        );
    }

    #[tokio::test]
    async fn test_confirmation_timeout() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 0).await;
        node.set_execution(Execution::Stuck).await;

        let hash = client.transfer(&account, AccountAddress::ONE, 1).await.unwrap();
        let err = client
            .await_execution(&hash, Some(Duration::from_millis(50)))
            .await
            .unwrap_err();

        match err {
            ClientError::ConfirmationTimeout { hash: h, timeout } => {
                assert_eq!(h, hash);
                assert_eq!(timeout, Duration::from_millis(50));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_polling_error_is_surfaced() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 0).await;
        let hash = client.transfer(&account, AccountAddress::ONE, 1).await.unwrap();

        node.fail(Operation::WaitByHash).await;
        let err = client.await_execution(&hash, None).await.unwrap_err();
        assert!(matches!(err, ClientError::ConfirmationFailed(_)));
    }

    #[tokio::test]
    async fn test_submission_failure() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 0).await;
        node.fail(Operation::Submit).await;

        let err = client
            .transfer(&account, AccountAddress::ONE, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::SubmissionFailed(_)));
        assert!(err.is_network_error());
    }

    #[tokio::test]
    async fn test_sign_and_submit_rejects_foreign_signer() {
        let (node, client, account) = setup();
        node.set_sequence_number(account.address(), 0).await;
        let raw = client
            .prepare(&account, TransactionPayload::transfer(AccountAddress::ONE, 1))
            .await
            .unwrap();

        let other = Account::from_seed(&[0x43; 32]);
        let err = client.sign_and_submit(&other, &raw).await.unwrap_err();
        assert!(err.is_input_error());
        assert!(node.submitted().await.is_empty());
    }

    #[test]
    fn test_new_validates_config() {
        let mut config = ClientConfig::new(Chain::new(ChainId::TESTNET, "http://memory/v1"));
        config.poll_interval = Duration::ZERO;
        assert!(matches!(
            CedraClient::new(MemoryNode::new(), config),
            Err(ClientError::InvalidConfig(_))
        ));
    }
}
