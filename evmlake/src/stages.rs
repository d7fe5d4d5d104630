pub mod decode_range;
pub mod fetch_head;
pub mod sync_range;

pub use decode_range::DecodeOutcome;
pub use fetch_head::{FetchHeadInput, HeadReport};
pub use sync_range::SyncOutcome;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::registry::{ContractRecord, RegistryError};

/// A registered contract annotated with the safe head its chain reached,
/// handed from FetchHead to SyncRange by the orchestrator's fan-out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractTarget {
    #[serde(flatten)]
    pub contract: ContractRecord,
    pub target_block: u64,
}

/// Failures that escape a stage un-structured. The orchestrator treats them
/// as retryable-then-fatal.
#[derive(Debug, Display)]
pub enum StageError {
    #[display("registry unavailable: {_0}")]
    Registry(RegistryError),
}

impl From<RegistryError> for StageError {
    fn from(value: RegistryError) -> Self {
        StageError::Registry(value)
    }
}
