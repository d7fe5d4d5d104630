pub mod abis;
pub mod chains;
pub mod client;
mod config;
pub mod decoder;
mod hashes;
pub mod planner;
mod ranges;
mod records;
pub mod registry;
pub mod stages;
pub mod stores;

pub use abis::{parse_abi, AbiError, AbiSource, FsAbiSource, HttpAbiSource};
pub use chains::Chain;
pub use client::{ApiLogEntry, ClientError, EtherscanApi, LogApi, LogClient};
pub use config::{Config, ConfigError, DEFAULT_MAX_CONCURRENCY, DEFAULT_REORG_BUFFER};
pub use planner::{plan, safe_head, SyncMode, SyncPlan};
pub use ranges::BlockRange;
pub use records::{
    normalize_hex, parse_hex_quantity, DecodeStatus, DecodedLogRecord, RawLogRecord,
};
pub use registry::{ContractRecord, MemoryRegistry, Registry, RegistryError};
pub use stages::{
    ContractTarget, DecodeOutcome, FetchHeadInput, HeadReport, StageError, SyncOutcome,
};
pub use stores::{
    Filter, FilterOp, MemoryStore, PartitionKey, PartitionScope, StoreError, TableRecord,
    TableStore, DECODED_LOGS_TABLE, RAW_LOGS_TABLE,
};
