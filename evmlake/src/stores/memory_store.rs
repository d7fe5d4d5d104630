use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use super::filters::numeric;
use super::{Filter, PartitionKey, PartitionScope, StoreError, TableRecord, TableStore};

type Partitions = BTreeMap<PartitionKey, Vec<Value>>;

/// In-process table store. Rows live in partition-keyed maps behind one
/// `RwLock`; tables come into existence on first non-empty write, matching
/// the backend contract the pipeline is written against.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Partitions>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn group_rows<R: TableRecord>(
        records: &[R],
    ) -> Result<BTreeMap<PartitionKey, Vec<Value>>, StoreError> {
        let mut grouped: BTreeMap<PartitionKey, Vec<Value>> = BTreeMap::new();

        for record in records {
            let row = serde_json::to_value(record)?;
            grouped.entry(record.partition_key()).or_default().push(row);
        }

        Ok(grouped)
    }
}

#[async_trait::async_trait]
impl TableStore for MemoryStore {
    async fn append<R: TableRecord>(&self, table: &str, records: &[R]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let grouped = Self::group_rows(records)?;

        let mut tables = self.tables.write().await;
        let partitions = tables.entry(table.to_string()).or_default();
        for (key, mut rows) in grouped {
            partitions.entry(key).or_default().append(&mut rows);
        }

        Ok(())
    }

    async fn overwrite_partitions<R: TableRecord>(
        &self,
        table: &str,
        scope: &PartitionScope,
        records: &[R],
    ) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let grouped = Self::group_rows(records)?;

        let mut tables = self.tables.write().await;
        let partitions = tables.entry(table.to_string()).or_default();
        partitions.retain(|key, _| !scope.contains(key));
        partitions.extend(grouped);

        Ok(())
    }

    async fn read<R: TableRecord>(
        &self,
        table: &str,
        filters: &[Filter],
    ) -> Result<Vec<R>, StoreError> {
        let tables = self.tables.read().await;
        let Some(partitions) = tables.get(table) else {
            return Ok(vec![]);
        };

        let mut records = vec![];
        for rows in partitions.values() {
            for row in rows {
                if filters.iter().all(|filter| filter.matches(row)) {
                    records.push(serde_json::from_value(row.clone())?);
                }
            }
        }

        Ok(records)
    }

    async fn table_exists(&self, table: &str) -> bool {
        self.tables.read().await.contains_key(table)
    }

    async fn max_value(
        &self,
        table: &str,
        column: &str,
        filters: &[Filter],
    ) -> Result<Option<u64>, StoreError> {
        let tables = self.tables.read().await;
        let Some(partitions) = tables.get(table) else {
            return Ok(None);
        };

        let max = partitions
            .values()
            .flatten()
            .filter(|row| filters.iter().all(|filter| filter.matches(row)))
            .filter_map(|row| row.get(column).and_then(numeric))
            .max();

        Ok(max)
    }
}
