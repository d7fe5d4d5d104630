mod api;
mod error;

pub use api::{ApiLogEntry, EtherscanApi, LogApi, LogsResponse, ProxyResponse};
pub use error::ClientError;

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

use crate::chains::{self, Chain};
use crate::ranges::BlockRange;
use crate::records::{normalize_hex, parse_hex_quantity, RawLogRecord};

pub const DEFAULT_RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_BLOCKS_PER_BATCH: u64 = 10_000;

/// Minimum-interval limiter. State is per client instance; parallel contract
/// workers holding their own client each enforce their own ceiling.
#[derive(Debug)]
struct RateLimiter {
    min_interval: Duration,
    last_request_at: Mutex<Option<Instant>>,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request_at: Mutex::new(None),
        }
    }

    async fn throttle(&self) {
        let mut last_request_at = self.last_request_at.lock().await;

        if let Some(at) = *last_request_at {
            let elapsed = at.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }

        *last_request_at = Some(Instant::now());
    }
}

/// Rate-limited client for the external log-index API, routing each chain id
/// to its fixed endpoint.
#[derive(Debug)]
pub struct LogClient<A: LogApi> {
    api: A,
    limiter: RateLimiter,
}

impl<A: LogApi> LogClient<A> {
    pub fn new(api: A) -> Self {
        Self::with_rate_limit(api, DEFAULT_RATE_LIMIT_INTERVAL)
    }

    pub fn with_rate_limit(api: A, min_interval: Duration) -> Self {
        Self {
            api,
            limiter: RateLimiter::new(min_interval),
        }
    }

    /// Latest block number for a chain. The endpoint answers hex-encoded;
    /// a missing or non-hex result is an error.
    pub async fn get_latest_block(&self, chain_id: u64) -> Result<u64, ClientError> {
        let chain = route(chain_id)?;

        self.limiter.throttle().await;
        let response = self.api.block_number(chain).await?;

        let result = response
            .result
            .ok_or_else(|| ClientError::InvalidResponse("missing latest-block result".into()))?;

        parse_hex_quantity(&result).map_err(|_| {
            ClientError::InvalidResponse(format!("latest block is not hex-encoded: {result}"))
        })
    }

    /// Event logs for a contract over `[from_block, to_block]`, fetched in
    /// consecutive windows of at most `batch_size` blocks. Windows run
    /// sequentially so the rate limit holds and results stay block-ascending.
    /// A window reporting no data contributes zero logs; transport failures
    /// abort the remaining windows.
    pub async fn get_logs(
        &self,
        chain_id: u64,
        address: &str,
        from_block: u64,
        to_block: u64,
        batch_size: u64,
    ) -> Result<Vec<RawLogRecord>, ClientError> {
        let chain = route(chain_id)?;

        let Some(range) = BlockRange::new(from_block, to_block) else {
            return Ok(vec![]);
        };

        let mut logs = vec![];
        for window in range.windows(batch_size) {
            self.limiter.throttle().await;
            let response =
                self.api.logs(chain, address, window.from_block, window.to_block).await?;

            let entries = response.entries()?;
            tracing::debug!(
                chain_id,
                address,
                from_block = window.from_block,
                to_block = window.to_block,
                count = entries.len(),
                "fetched log window"
            );

            for entry in entries {
                logs.push(to_raw_record(entry, chain_id, address)?);
            }
        }

        Ok(logs)
    }
}

fn route(chain_id: u64) -> Result<&'static Chain, ClientError> {
    chains::get(chain_id).ok_or(ClientError::UnsupportedChain { chain_id })
}

fn to_raw_record(
    entry: ApiLogEntry,
    chain_id: u64,
    contract_address: &str,
) -> Result<RawLogRecord, ClientError> {
    let topics: Vec<String> = entry.topics.iter().map(|topic| normalize_hex(topic)).collect();
    let topic0 = RawLogRecord::topic0_of(&topics);

    Ok(RawLogRecord {
        chain_id,
        contract_address: contract_address.to_lowercase(),
        block_number: quantity(&entry.block_number, "blockNumber")?,
        transaction_hash: normalize_hex(&entry.transaction_hash),
        transaction_index: quantity(&entry.transaction_index, "transactionIndex")?,
        log_index: quantity(&entry.log_index, "logIndex")?,
        address: entry.address.to_lowercase(),
        data: normalize_hex(&entry.data),
        topics,
        topic0,
    })
}

fn quantity(hex: &str, field: &str) -> Result<u64, ClientError> {
    parse_hex_quantity(hex)
        .map_err(|_| ClientError::InvalidResponse(format!("{field} is not hex-encoded: {hex}")))
}
