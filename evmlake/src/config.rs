use std::env;
use std::time::Duration;

use derive_more::Display;

use crate::client::{DEFAULT_BLOCKS_PER_BATCH, DEFAULT_RATE_LIMIT_INTERVAL};
use crate::stores::{DECODED_LOGS_TABLE, RAW_LOGS_TABLE};

pub const DEFAULT_REORG_BUFFER: u64 = 50;
pub const DEFAULT_MAX_CONCURRENCY: u32 = 5;

#[derive(Debug, Display)]
pub enum ConfigError {
    #[display("an API key is required")]
    MissingApiKey,
    #[display("blocks_per_batch must be at least 1")]
    ZeroBatchSize,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub reorg_buffer: u64,
    pub rate_limit_interval: Duration,
    pub blocks_per_batch: u64,
    pub raw_logs_table: String,
    pub decoded_logs_table: String,
    /// Hint for the orchestrator's per-stage fan-out; the core itself does
    /// not spawn workers.
    pub max_concurrency: u32,
}

impl Config {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            reorg_buffer: DEFAULT_REORG_BUFFER,
            rate_limit_interval: DEFAULT_RATE_LIMIT_INTERVAL,
            blocks_per_batch: DEFAULT_BLOCKS_PER_BATCH,
            raw_logs_table: RAW_LOGS_TABLE.to_string(),
            decoded_logs_table: DECODED_LOGS_TABLE.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Deployment-level configuration, falling back to defaults for any
    /// unset variable.
    pub fn from_env() -> Self {
        let mut config = Self::new(&env::var("ETHERSCAN_API_KEY").unwrap_or_default());

        config.reorg_buffer = env_u64("REORG_BUFFER_BLOCKS", config.reorg_buffer);
        config.rate_limit_interval = Duration::from_millis(env_u64(
            "RATE_LIMIT_INTERVAL_MS",
            config.rate_limit_interval.as_millis() as u64,
        ));
        config.blocks_per_batch = env_u64("BLOCKS_PER_BATCH", config.blocks_per_batch);
        if let Ok(table) = env::var("RAW_LOGS_TABLE") {
            config.raw_logs_table = table;
        }
        if let Ok(table) = env::var("DECODED_LOGS_TABLE") {
            config.decoded_logs_table = table;
        }
        config.max_concurrency = env_u64("MAX_CONCURRENCY", config.max_concurrency as u64) as u32;

        config
    }

    pub fn with_reorg_buffer(mut self, reorg_buffer: u64) -> Self {
        self.reorg_buffer = reorg_buffer;

        self
    }

    pub fn with_rate_limit_interval(mut self, rate_limit_interval: Duration) -> Self {
        self.rate_limit_interval = rate_limit_interval;

        self
    }

    pub fn with_blocks_per_batch(mut self, blocks_per_batch: u64) -> Self {
        self.blocks_per_batch = blocks_per_batch;

        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: u32) -> Self {
        self.max_concurrency = max_concurrency;

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.blocks_per_batch == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }

        Ok(())
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name).ok().and_then(|value| value.parse().ok()).unwrap_or(default)
}
