mod filters;
mod memory_store;
mod store;

pub use filters::{Filter, FilterOp};
pub use memory_store::MemoryStore;
pub use store::{PartitionKey, PartitionScope, StoreError, TableRecord, TableStore};

pub const RAW_LOGS_TABLE: &str = "raw_logs";
pub const DECODED_LOGS_TABLE: &str = "decoded_logs";
