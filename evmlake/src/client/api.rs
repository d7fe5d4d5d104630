use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::ClientError;
use crate::chains::Chain;

/// Response to a latest-block request. The block number arrives hex-encoded.
#[derive(Clone, Debug, Deserialize)]
pub struct ProxyResponse {
    #[serde(default)]
    pub result: Option<String>,
}

/// Response to a log-fetch request. `status` is `"1"` on success; on other
/// statuses `result` may be a bare message string rather than a list, so it
/// stays untyped until the window is known to carry logs.
#[derive(Clone, Debug, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Value,
}

impl LogsResponse {
    /// Log entries for this window. A non-success status or a missing
    /// result list reads as zero logs; a present list that fails to parse
    /// is an invalid response.
    pub fn entries(&self) -> Result<Vec<ApiLogEntry>, ClientError> {
        if self.status.as_deref() != Some("1") || !self.result.is_array() {
            return Ok(vec![]);
        }

        serde_json::from_value(self.result.clone())
            .map_err(|error| ClientError::InvalidResponse(format!("log entry shape: {error}")))
    }
}

/// One raw log entry as returned by the log-index API. Quantity fields are
/// hex-encoded strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLogEntry {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default = "hex_zero")]
    pub data: String,
    #[serde(default)]
    pub block_number: String,
    #[serde(default)]
    pub transaction_hash: String,
    #[serde(default)]
    pub transaction_index: String,
    #[serde(default)]
    pub log_index: String,
}

fn hex_zero() -> String {
    "0x".to_string()
}

/// Transport seam for the external log-index API. The production
/// implementation is [`EtherscanApi`]; tests stub this trait.
#[async_trait::async_trait]
pub trait LogApi: Send + Sync {
    async fn block_number(&self, chain: &Chain) -> Result<ProxyResponse, ClientError>;

    async fn logs(
        &self,
        chain: &Chain,
        address: &str,
        from_block: u64,
        to_block: u64,
    ) -> Result<LogsResponse, ClientError>;
}

/// Etherscan-v2-style HTTP transport.
#[derive(Clone, Debug)]
pub struct EtherscanApi {
    http: reqwest::Client,
    api_key: String,
}

impl EtherscanApi {
    pub fn new(api_key: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("default TLS backend must be available");

        Self {
            http,
            api_key: api_key.to_string(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        chain: &Chain,
        params: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(chain.api_url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl LogApi for EtherscanApi {
    async fn block_number(&self, chain: &Chain) -> Result<ProxyResponse, ClientError> {
        self.get(chain, &[("module", "proxy"), ("action", "eth_blockNumber")]).await
    }

    async fn logs(
        &self,
        chain: &Chain,
        address: &str,
        from_block: u64,
        to_block: u64,
    ) -> Result<LogsResponse, ClientError> {
        self.get(
            chain,
            &[
                ("module", "logs"),
                ("action", "getLogs"),
                ("address", address),
                ("fromBlock", &from_block.to_string()),
                ("toBlock", &to_block.to_string()),
            ],
        )
        .await
    }
}
