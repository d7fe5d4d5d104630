use rand::Rng;
use serde_json::{json, Value};

use evmlake::RawLogRecord;

pub const TRANSFER_TOPIC: &str =
    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";
pub const APPROVAL_TOPIC: &str =
    "0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925";

pub const ALICE_TOPIC: &str =
    "0x000000000000000000000000b518b3136e491101f22b77f385fe22269c515188";
pub const BOB_TOPIC: &str =
    "0x0000000000000000000000007dfd6013cf8d92b751e63d481b51fe0e4c5abf5e";

pub const ALICE_ADDRESS: &str = "0xb518b3136e491101f22b77f385fe22269c515188";
pub const BOB_ADDRESS: &str = "0x7dfd6013cf8d92b751e63d481b51fe0e4c5abf5e";

/// ABI-encoded uint256 value of 100.
pub const VALUE_100_DATA: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000064";

/// A Transfer log entry in the wire shape the log-index API returns.
pub fn transfer_entry(block_number: u64, log_index: u64) -> Value {
    json!({
        "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        "topics": [TRANSFER_TOPIC, ALICE_TOPIC, BOB_TOPIC],
        "data": VALUE_100_DATA,
        "blockNumber": format!("{block_number:#x}"),
        "transactionHash": "0x83d751998ff98cd609bc9b18bb36bdef8659cde2f74d6d7a1b0fef2c2bf8f839",
        "transactionIndex": "0x59",
        "logIndex": format!("{log_index:#x}"),
    })
}

pub fn transfer_raw_log(
    chain_id: u64,
    contract_address: &str,
    block_number: u64,
    log_index: u64,
) -> RawLogRecord {
    let topics: Vec<String> =
        [TRANSFER_TOPIC, ALICE_TOPIC, BOB_TOPIC].iter().map(|t| t.to_string()).collect();
    let topic0 = RawLogRecord::topic0_of(&topics);

    RawLogRecord {
        chain_id,
        contract_address: contract_address.to_lowercase(),
        block_number,
        transaction_hash: "0x83d751998ff98cd609bc9b18bb36bdef8659cde2f74d6d7a1b0fef2c2bf8f839"
            .to_string(),
        transaction_index: 89,
        log_index,
        address: contract_address.to_lowercase(),
        data: VALUE_100_DATA.to_string(),
        topics,
        topic0,
    }
}

pub fn transfer_log(chain_id: u64, contract_address: &str) -> RawLogRecord {
    let log_index = rand::thread_rng().gen_range(1..800);

    transfer_raw_log(chain_id, contract_address, 18_115_958, log_index)
}

pub fn unmatched_raw_log(chain_id: u64, contract_address: &str, block_number: u64) -> RawLogRecord {
    let mut log = transfer_raw_log(chain_id, contract_address, block_number, 1);
    log.topics = vec![APPROVAL_TOPIC.to_string(), ALICE_TOPIC.to_string(), BOB_TOPIC.to_string()];
    log.topic0 = RawLogRecord::topic0_of(&log.topics);

    log
}

pub fn topicless_raw_log(chain_id: u64, contract_address: &str, block_number: u64) -> RawLogRecord {
    let mut log = transfer_raw_log(chain_id, contract_address, block_number, 2);
    log.topics = vec![];
    log.topic0 = None;

    log
}
