use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SyncOutcome;
use crate::abis::AbiSource;
use crate::config::Config;
use crate::decoder;
use crate::records::RawLogRecord;
use crate::stores::{Filter, PartitionScope, TableStore};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecodeOutcome {
    Success {
        chain_id: u64,
        contract_address: String,
        decoded_count: usize,
        events_found: Vec<String>,
        decode_stats: BTreeMap<String, usize>,
        synced_from_block: u64,
        synced_to_block: u64,
    },
    /// The upstream sync produced nothing to decode, or failed.
    Skipped {
        chain_id: u64,
        contract_address: String,
        reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// Storage holds no raw rows for this contract at all. Distinct from
    /// `Skipped`: the planner found nothing to fetch vs. nothing has ever
    /// been ingested.
    NoData {
        chain_id: u64,
        contract_address: String,
        message: String,
    },
    Error {
        chain_id: u64,
        contract_address: String,
        error: String,
    },
}

/// Re-decodes every raw row of one contract against its ABI and replaces
/// the contract's decoded partitions wholesale, so a changed ABI reflows
/// the whole derived view on the next run.
pub async fn run<S: TableStore, B: AbiSource>(
    upstream: &SyncOutcome,
    store: &S,
    abis: &B,
    config: &Config,
) -> DecodeOutcome {
    let (chain_id, contract_address, contract_abi, synced_from_block, synced_to_block) =
        match upstream {
            SyncOutcome::NoNewData {
                chain_id,
                contract_address,
                ..
            } => {
                tracing::info!(
                    chain_id,
                    contract_address = %contract_address,
                    "no new data from sync step, skipping decode"
                );
                return DecodeOutcome::Skipped {
                    chain_id: *chain_id,
                    contract_address: contract_address.clone(),
                    reason: "no_new_data".into(),
                    error: None,
                };
            }
            SyncOutcome::Error {
                chain_id,
                contract_address,
                error,
            } => {
                return DecodeOutcome::Skipped {
                    chain_id: *chain_id,
                    contract_address: contract_address.clone(),
                    reason: "previous_step_failed".into(),
                    error: Some(error.clone()),
                };
            }
            SyncOutcome::Success {
                chain_id,
                contract_address,
                contract_abi,
                synced_from_block,
                synced_to_block,
                ..
            } => (
                *chain_id,
                contract_address.to_lowercase(),
                contract_abi.clone(),
                *synced_from_block,
                *synced_to_block,
            ),
        };

    if chain_id == 0 || contract_address.is_empty() {
        return DecodeOutcome::Error {
            chain_id,
            contract_address,
            error: "missing required fields: chain_id or contract_address".into(),
        };
    }

    if contract_abi.is_empty() {
        return DecodeOutcome::Error {
            chain_id,
            contract_address,
            error: "no ABI location provided".into(),
        };
    }

    let abi = match abis.fetch_abi(&contract_abi).await {
        Ok(abi) => abi,
        Err(error) => {
            return DecodeOutcome::Error {
                chain_id,
                contract_address,
                error: format!("failed to load ABI: {error}"),
            }
        }
    };

    let filters = [
        Filter::eq("chainid", chain_id),
        Filter::eq("contract_address", contract_address.clone()),
    ];
    let raw_logs: Vec<RawLogRecord> = match store.read(&config.raw_logs_table, &filters).await {
        Ok(rows) => rows,
        Err(error) => {
            return DecodeOutcome::Error {
                chain_id,
                contract_address,
                error: format!("failed to read raw logs: {error}"),
            }
        }
    };

    if raw_logs.is_empty() {
        return DecodeOutcome::NoData {
            chain_id,
            contract_address,
            message: "no raw logs found for this contract".into(),
        };
    }

    let decoded = decoder::decode(&raw_logs, &abi);

    let scope = PartitionScope::new(chain_id, &contract_address);
    if let Err(error) =
        store.overwrite_partitions(&config.decoded_logs_table, &scope, &decoded).await
    {
        return DecodeOutcome::Error {
            chain_id,
            contract_address,
            error: format!("failed to write decoded logs: {error}"),
        };
    }

    let mut events_found: Vec<String> = vec![];
    let mut decode_stats: BTreeMap<String, usize> = BTreeMap::new();
    for record in &decoded {
        *decode_stats.entry(record.decode_status.as_str().to_string()).or_insert(0) += 1;

        if let Some(name) = &record.event_name {
            if !events_found.contains(name) {
                events_found.push(name.clone());
            }
        }
    }

    tracing::info!(
        chain_id,
        contract_address = %contract_address,
        decoded_count = decoded.len(),
        ?events_found,
        "replaced decoded partitions"
    );

    DecodeOutcome::Success {
        chain_id,
        contract_address,
        decoded_count: decoded.len(),
        events_found,
        decode_stats,
        synced_from_block,
        synced_to_block,
    }
}
