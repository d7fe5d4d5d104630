use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use evmlake::client::{LogsResponse, ProxyResponse};
use evmlake::{Chain, ClientError, LogApi};

use super::transfer_entry;

/// Configurable stand-in for the log-index API transport. Chains without a
/// stubbed head fail their latest-block request, which is how tests exercise
/// partial-failure paths.
#[derive(Clone, Debug, Default)]
pub struct StubApi {
    latest_blocks: HashMap<u64, Option<String>>,
    entries: Vec<Value>,
    status: Option<&'static str>,
    result_override: Option<Value>,
    echo_windows: bool,
    fail_logs: bool,
    windows: Arc<Mutex<Vec<(u64, u64)>>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self {
            status: Some("1"),
            ..Self::default()
        }
    }

    pub fn with_latest_block(mut self, chain_id: u64, block_number: u64) -> Self {
        self.latest_blocks.insert(chain_id, Some(format!("{block_number:#x}")));

        self
    }

    pub fn with_raw_latest(mut self, chain_id: u64, raw_result: &str) -> Self {
        self.latest_blocks.insert(chain_id, Some(raw_result.to_string()));

        self
    }

    pub fn with_missing_latest(mut self, chain_id: u64) -> Self {
        self.latest_blocks.insert(chain_id, None);

        self
    }

    pub fn with_entries(mut self, entries: Vec<Value>) -> Self {
        self.entries = entries;

        self
    }

    /// Every log window answers with a single Transfer entry at the
    /// window's first block, so tests can observe concatenation order.
    pub fn echoing_windows(mut self) -> Self {
        self.echo_windows = true;

        self
    }

    pub fn with_status(mut self, status: &'static str) -> Self {
        self.status = Some(status);

        self
    }

    pub fn with_result(mut self, result: Value) -> Self {
        self.result_override = Some(result);

        self
    }

    pub fn failing_logs(mut self) -> Self {
        self.fail_logs = true;

        self
    }

    pub async fn requested_windows(&self) -> Vec<(u64, u64)> {
        self.windows.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl LogApi for StubApi {
    async fn block_number(&self, chain: &Chain) -> Result<ProxyResponse, ClientError> {
        match self.latest_blocks.get(&chain.id) {
            Some(result) => Ok(ProxyResponse {
                result: result.clone(),
            }),
            None => Err(ClientError::InvalidResponse(format!(
                "no head stubbed for chain {}",
                chain.id
            ))),
        }
    }

    async fn logs(
        &self,
        _chain: &Chain,
        _address: &str,
        from_block: u64,
        to_block: u64,
    ) -> Result<LogsResponse, ClientError> {
        self.windows.lock().await.push((from_block, to_block));

        if self.fail_logs {
            return Err(ClientError::InvalidResponse("stubbed transport failure".into()));
        }

        let result = match (&self.result_override, self.echo_windows) {
            (Some(result), _) => result.clone(),
            (None, true) => Value::Array(vec![transfer_entry(from_block, 1)]),
            (None, false) => Value::Array(self.entries.clone()),
        };

        Ok(LogsResponse {
            status: self.status.map(String::from),
            result,
        })
    }
}

pub fn empty_api() -> StubApi {
    StubApi::new().with_latest_block(1, 0)
}
