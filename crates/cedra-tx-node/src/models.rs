//! JSON response bodies returned by the node's REST API.

use serde::{Deserialize, Serialize};

use crate::error::{NodeError, Result};

/// `vm_status` reported for a successfully executed transaction.
pub const VM_STATUS_SUCCESS: &str = "Executed successfully";

/// `type` reported while a transaction is still in the mempool.
pub const PENDING_TRANSACTION_TYPE: &str = "pending_transaction";

/// `GET /accounts/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Decimal string, as the node encodes u64 values.
    pub sequence_number: String,
    #[serde(default)]
    pub authentication_key: Option<String>,
}

impl AccountInfo {
    pub fn sequence_number(&self) -> Result<u64> {
        self.sequence_number.parse().map_err(|_| {
            NodeError::InvalidResponse(format!(
                "sequence_number is not a u64: {:?}",
                self.sequence_number
            ))
        })
    }
}

/// `GET /estimate_gas_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasEstimate {
    pub gas_estimate: u64,
    #[serde(default)]
    pub prioritized_gas_estimate: Option<u64>,
    #[serde(default)]
    pub deprioritized_gas_estimate: Option<u64>,
}

/// `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
}

/// `GET /transactions/wait_by_hash/{hash}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub hash: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub vm_status: String,
    #[serde(default)]
    pub success: Option<bool>,
}

impl TransactionStatus {
    /// Still in the mempool.
    pub fn is_pending(&self) -> bool {
        self.kind == PENDING_TRANSACTION_TYPE
    }

    /// Committed and executed successfully.
    pub fn is_executed(&self) -> bool {
        !self.is_pending() && self.vm_status == VM_STATUS_SUCCESS
    }
}
