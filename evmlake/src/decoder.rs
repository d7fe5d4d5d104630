mod tokens;

use std::collections::HashMap;
use std::str::FromStr;

use derive_more::Display;
use ethers::abi::{Abi, Event, RawLog};
use ethers::types::H256;
use serde_json::Map;

use crate::hashes::Hashes;
use crate::records::{normalize_hex, DecodeStatus, DecodedLogRecord, RawLogRecord};

/// Decodes every log against the ABI's event set. Total and pure: each input
/// yields exactly one output record tagged with a [`DecodeStatus`], and a log
/// that fails to decode never aborts the batch.
///
/// The signature lookup is rebuilt from the ABI on every call rather than
/// cached, so a changed ABI takes effect on the next run.
pub fn decode(logs: &[RawLogRecord], abi: &Abi) -> Vec<DecodedLogRecord> {
    let events_by_signature = group_events_by_signature(abi);

    logs.iter().map(|log| decode_log(log, &events_by_signature)).collect()
}

fn group_events_by_signature(abi: &Abi) -> HashMap<String, &Event> {
    abi.events()
        .map(|event| (Hashes::h256_to_string(&event.signature()), event))
        .collect()
}

fn decode_log(log: &RawLogRecord, events: &HashMap<String, &Event>) -> DecodedLogRecord {
    let Some(first_topic) = log.topics.first() else {
        return DecodedLogRecord::undecoded(log, DecodeStatus::NoTopics);
    };

    let signature = normalize_hex(first_topic);
    let Some(event) = events.get(&signature) else {
        return DecodedLogRecord::undecoded(log, DecodeStatus::UnknownEvent);
    };

    match decode_matched(log, event) {
        Ok(decoded_args) => DecodedLogRecord::decoded(log, &event.name, decoded_args),
        Err(error) => DecodedLogRecord::failed(log, error.to_string()),
    }
}

/// Decodes a log against its matched event: indexed parameters from
/// `topics[1..]`, the rest from the data payload, in ABI declaration order.
fn decode_matched(
    log: &RawLogRecord,
    event: &Event,
) -> Result<Map<String, serde_json::Value>, DecodeError> {
    let topics = log
        .topics
        .iter()
        .map(|topic| {
            H256::from_str(topic).map_err(|_| DecodeError::InvalidTopic(topic.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let data = decode_payload(&log.data)?;

    let parsed = event.parse_log(RawLog { topics, data })?;

    Ok(parsed
        .params
        .into_iter()
        .map(|param| (param.name, tokens::to_json(param.value)))
        .collect())
}

fn decode_payload(data: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = data.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(vec![]);
    }

    ethers::utils::hex::decode(digits)
        .map_err(|error| DecodeError::InvalidData(error.to_string()))
}

#[derive(Debug, Display)]
enum DecodeError {
    #[display("topic is not a 32-byte hex hash: {_0}")]
    InvalidTopic(String),
    #[display("data payload is not valid hex: {_0}")]
    InvalidData(String),
    #[display("log does not match event schema: {_0}")]
    Abi(ethers::abi::Error),
}

impl From<ethers::abi::Error> for DecodeError {
    fn from(value: ethers::abi::Error) -> Self {
        DecodeError::Abi(value)
    }
}
