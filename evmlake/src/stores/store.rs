use derive_more::Display;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Filter;

/// Partition coordinates for both log tables: `(chainid, contract_address,
/// topic0)`. `topic0` is absent for logs carrying no topics.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey {
    pub chain_id: u64,
    pub contract_address: String,
    pub topic0: Option<String>,
}

/// All partitions belonging to one contract on one chain. Partition
/// overwrites replace exactly this set, leaving other contracts' data
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionScope {
    pub chain_id: u64,
    pub contract_address: String,
}

impl PartitionScope {
    pub fn new(chain_id: u64, contract_address: &str) -> Self {
        Self {
            chain_id,
            contract_address: contract_address.to_lowercase(),
        }
    }

    pub fn contains(&self, key: &PartitionKey) -> bool {
        self.chain_id == key.chain_id
            && self.contract_address == key.contract_address.to_lowercase()
    }
}

#[derive(Debug, Display)]
pub enum StoreError {
    #[display("row shape not serializable: {_0}")]
    Serialization(String),
    #[display("storage backend failure: {_0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        StoreError::Serialization(value.to_string())
    }
}

/// A row that knows its partition coordinates and exposes named columns for
/// predicate filtering.
pub trait TableRecord: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn partition_key(&self) -> PartitionKey;

    fn column(&self, name: &str) -> Option<serde_json::Value> {
        serde_json::to_value(self).ok()?.get(name).cloned()
    }
}

/// Partitioned, transactional table storage. The engine behind it owns
/// commit isolation across writers targeting disjoint partitions; this
/// trait only states the read/append/overwrite surface the pipeline needs.
#[async_trait::async_trait]
pub trait TableStore: Send + Sync {
    /// Appends `records` under their own partition keys. Appending an empty
    /// record set is a no-op and must not create the table.
    async fn append<R: TableRecord>(&self, table: &str, records: &[R]) -> Result<(), StoreError>;

    /// Replaces every partition under `scope` with `records`, leaving
    /// partitions outside the scope untouched. An empty record set is a
    /// no-op.
    async fn overwrite_partitions<R: TableRecord>(
        &self,
        table: &str,
        scope: &PartitionScope,
        records: &[R],
    ) -> Result<(), StoreError>;

    /// Reads rows matching every filter. A missing table reads as empty;
    /// any other failure propagates.
    async fn read<R: TableRecord>(
        &self,
        table: &str,
        filters: &[Filter],
    ) -> Result<Vec<R>, StoreError>;

    async fn table_exists(&self, table: &str) -> bool;

    /// Maximum value of a numeric column over the filtered rows. Columns
    /// holding `0x`-hex quantities are compared by their decoded value.
    async fn max_value(
        &self,
        table: &str,
        column: &str,
        filters: &[Filter],
    ) -> Result<Option<u64>, StoreError>;
}
