use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::stores::{PartitionKey, TableRecord};

/// One on-chain log entry as ingested, keyed for partitioning by
/// `(chainid, contract_address, topic0)`. Immutable once written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawLogRecord {
    #[serde(rename = "chainid")]
    pub chain_id: u64,
    pub contract_address: String,
    pub block_number: u64,
    pub transaction_hash: String,
    pub transaction_index: u64,
    pub log_index: u64,
    pub address: String,
    pub data: String,
    pub topics: Vec<String>,
    pub topic0: Option<String>,
}

impl RawLogRecord {
    pub fn topic0_of(topics: &[String]) -> Option<String> {
        topics.first().map(|topic| normalize_hex(topic))
    }
}

impl TableRecord for RawLogRecord {
    fn partition_key(&self) -> PartitionKey {
        PartitionKey {
            chain_id: self.chain_id,
            contract_address: self.contract_address.clone(),
            topic0: self.topic0.clone(),
        }
    }
}

/// Outcome tag attached to every decoded record. Decoding is total: every
/// raw record yields exactly one decoded record carrying one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStatus {
    Success,
    UnknownEvent,
    NoTopics,
    Error,
}

impl DecodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeStatus::Success => "success",
            DecodeStatus::UnknownEvent => "unknown_event",
            DecodeStatus::NoTopics => "no_topics",
            DecodeStatus::Error => "error",
        }
    }
}

/// A [`RawLogRecord`] plus its ABI decoding result. Fully recomputed per
/// contract partition on each decode run, so it stays reproducible from raw
/// data alone even when the ABI changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedLogRecord {
    #[serde(flatten)]
    pub raw: RawLogRecord,
    pub event_name: Option<String>,
    pub decoded_args: Map<String, serde_json::Value>,
    pub decode_status: DecodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

impl DecodedLogRecord {
    pub fn undecoded(raw: &RawLogRecord, decode_status: DecodeStatus) -> Self {
        Self {
            raw: raw.clone(),
            event_name: None,
            decoded_args: Map::new(),
            decode_status,
            decode_error: None,
        }
    }

    pub fn decoded(
        raw: &RawLogRecord,
        event_name: &str,
        decoded_args: Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            raw: raw.clone(),
            event_name: Some(event_name.to_string()),
            decoded_args,
            decode_status: DecodeStatus::Success,
            decode_error: None,
        }
    }

    pub fn failed(raw: &RawLogRecord, decode_error: String) -> Self {
        Self {
            raw: raw.clone(),
            event_name: None,
            decoded_args: Map::new(),
            decode_status: DecodeStatus::Error,
            decode_error: Some(decode_error),
        }
    }
}

impl TableRecord for DecodedLogRecord {
    fn partition_key(&self) -> PartitionKey {
        self.raw.partition_key()
    }
}

/// Lowercases a hex payload and guarantees the `0x` prefix.
pub fn normalize_hex(hex: &str) -> String {
    let lowered = hex.to_lowercase();
    if lowered.starts_with("0x") {
        lowered
    } else {
        format!("0x{lowered}")
    }
}

/// Parses a hex-encoded quantity such as `0x12af`. The API encodes a zero
/// `logIndex` as bare `"0x"`.
pub fn parse_hex_quantity(hex: &str) -> Result<u64, std::num::ParseIntError> {
    let digits = hex.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16)
}
