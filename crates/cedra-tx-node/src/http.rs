//! REST client for a Cedra full node.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use cedra_tx_core::AccountAddress;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{NodeError, Result};
use crate::models::{AccountInfo, GasEstimate, PendingTransaction, TransactionStatus};
use crate::node::NodeClient;

/// Header identifying this client to the node.
pub const CLIENT_HEADER: &str = "x-cedra-client";

/// Value sent in [`CLIENT_HEADER`].
pub const CLIENT_NAME: &str = "cedra-tx-publisher";

/// Content type of a canonically encoded signed transaction.
pub const SIGNED_TRANSACTION_CONTENT_TYPE: &str = "application/x.cedra.signed_transaction+bcs";

/// Per-request timeout used by [`HttpNode::new`].
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// [`NodeClient`] over the node's REST API.
#[derive(Debug, Clone)]
pub struct HttpNode {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpNode {
    /// Connect to `node_url` (e.g. `https://testnet.cedra.dev/v1`).
    pub fn new(node_url: &str) -> Result<Self> {
        Self::with_timeout(node_url, DEFAULT_HTTP_TIMEOUT)
    }

    pub fn with_timeout(node_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(node_url).map_err(|e| NodeError::Url(format!("{}: {}", node_url, e)))?;
        // Without a trailing slash, joining would drop the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(CLIENT_HEADER),
            HeaderValue::from_static(CLIENT_NAME),
        );
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| NodeError::Url(format!("{}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let resp = self.client.get(url).send().await?;
        read_json(resp).await
    }
}

/// Accept 200 and 202, decode the body as JSON.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if status != StatusCode::OK && status != StatusCode::ACCEPTED {
        let body = resp.text().await.unwrap_or_default();
        return Err(NodeError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl NodeClient for HttpNode {
    async fn sequence_number(&self, address: &AccountAddress) -> Result<u64> {
        let info: AccountInfo = self.get_json(&format!("accounts/{}", address)).await?;
        info.sequence_number()
    }

    async fn estimate_gas_price(&self) -> Result<GasEstimate> {
        self.get_json("estimate_gas_price").await
    }

    async fn submit_transaction(&self, signed: Bytes) -> Result<PendingTransaction> {
        let url = self.endpoint("transactions")?;
        debug!(%url, bytes = signed.len(), "POST signed transaction");
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, SIGNED_TRANSACTION_CONTENT_TYPE)
            .body(signed)
            .send()
            .await?;
        read_json(resp).await
    }

    async fn wait_by_hash(&self, hash: &str) -> Result<TransactionStatus> {
        self.get_json(&format!("transactions/wait_by_hash/{}", hash))
            .await
    }
}
