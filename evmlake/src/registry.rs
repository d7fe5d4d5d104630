use std::collections::HashMap;
use std::sync::Arc;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::chains;

/// Durable per-(chain, contract) sync state. Registration happens outside
/// the pipeline; the pipeline only reads these at the start of a run and
/// advances `last_updated_block` after a successful sync.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub chain_id: u64,
    pub contract_address: String,
    #[serde(default)]
    pub chain_name: String,
    #[serde(default)]
    pub contract_abi: String,
    #[serde(default)]
    pub last_updated_block: u64,
    #[serde(default)]
    pub contract_creation_block: u64,
    #[serde(default)]
    pub contract_creation_date: String,
}

impl ContractRecord {
    pub fn new(
        chain_id: u64,
        contract_address: &str,
        contract_abi: &str,
        contract_creation_block: u64,
    ) -> Self {
        Self {
            chain_id,
            contract_address: contract_address.to_lowercase(),
            chain_name: chains::chain_name(chain_id),
            contract_abi: contract_abi.to_string(),
            last_updated_block: 0,
            contract_creation_block,
            contract_creation_date: String::new(),
        }
    }
}

#[derive(Debug, Display)]
pub enum RegistryError {
    #[display("no registered contract {contract_address} on chain {chain_id}")]
    NotFound {
        chain_id: u64,
        contract_address: String,
    },
    #[display("watermark for {contract_address} on chain {chain_id} would regress from {current} to {attempted}")]
    WatermarkRegression {
        chain_id: u64,
        contract_address: String,
        current: u64,
        attempted: u64,
    },
    #[display("registry backend failure: {_0}")]
    Backend(String),
}

/// The sole source of truth for sync progress, partitioned by
/// `(chain_id, contract_address)` so concurrent contract workers never
/// contend on the same record.
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    async fn get_contracts(&self) -> Result<Vec<ContractRecord>, RegistryError>;

    /// Advances the watermark. `last_updated_block` is monotonically
    /// non-decreasing for a given contract; a regressing update is refused.
    async fn update_last_synced_block(
        &self,
        chain_id: u64,
        contract_address: &str,
        block_number: u64,
    ) -> Result<(), RegistryError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryRegistry {
    contracts: Arc<RwLock<HashMap<(u64, String), ContractRecord>>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, record: ContractRecord) {
        let key = (record.chain_id, record.contract_address.to_lowercase());
        self.contracts.write().await.insert(key, record);
    }

    pub async fn get(&self, chain_id: u64, contract_address: &str) -> Option<ContractRecord> {
        let key = (chain_id, contract_address.to_lowercase());
        self.contracts.read().await.get(&key).cloned()
    }
}

#[async_trait::async_trait]
impl Registry for MemoryRegistry {
    async fn get_contracts(&self) -> Result<Vec<ContractRecord>, RegistryError> {
        let contracts = self.contracts.read().await;

        let mut records: Vec<_> = contracts.values().cloned().collect();
        records.sort_by(|a, b| {
            (a.chain_id, &a.contract_address).cmp(&(b.chain_id, &b.contract_address))
        });

        Ok(records)
    }

    async fn update_last_synced_block(
        &self,
        chain_id: u64,
        contract_address: &str,
        block_number: u64,
    ) -> Result<(), RegistryError> {
        let key = (chain_id, contract_address.to_lowercase());
        let mut contracts = self.contracts.write().await;

        let record = contracts.get_mut(&key).ok_or_else(|| RegistryError::NotFound {
            chain_id,
            contract_address: contract_address.to_string(),
        })?;

        if block_number < record.last_updated_block {
            return Err(RegistryError::WatermarkRegression {
                chain_id,
                contract_address: contract_address.to_string(),
                current: record.last_updated_block,
                attempted: block_number,
            });
        }

        record.last_updated_block = block_number;

        Ok(())
    }
}
