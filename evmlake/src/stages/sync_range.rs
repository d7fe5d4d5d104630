use serde::{Deserialize, Serialize};

use super::ContractTarget;
use crate::client::{LogApi, LogClient};
use crate::config::Config;
use crate::planner::{self, SyncMode};
use crate::registry::Registry;
use crate::stores::TableStore;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    Success {
        chain_id: u64,
        contract_address: String,
        chain_name: String,
        contract_abi: String,
        synced_from_block: u64,
        synced_to_block: u64,
        logs_count: usize,
    },
    /// The planned range was empty: already synced to the target block. The
    /// watermark is left untouched and downstream stages treat this as a
    /// skip signal.
    NoNewData {
        chain_id: u64,
        contract_address: String,
        last_updated_block: u64,
        target_block: u64,
    },
    Error {
        chain_id: u64,
        contract_address: String,
        error: String,
    },
}

/// Plans the block range for one contract, fetches its logs, appends them to
/// the raw table and advances the registry watermark to the target block.
pub async fn run<A: LogApi, R: Registry, S: TableStore>(
    request: &ContractTarget,
    client: &LogClient<A>,
    registry: &R,
    store: &S,
    config: &Config,
) -> SyncOutcome {
    let contract = &request.contract;
    let chain_id = contract.chain_id;
    let contract_address = contract.contract_address.to_lowercase();

    if chain_id == 0 || contract_address.is_empty() || request.target_block == 0 {
        return SyncOutcome::Error {
            chain_id,
            contract_address,
            error: "missing required fields: chain_id, contract_address, or target_block".into(),
        };
    }

    let Some(plan) = planner::plan(contract, request.target_block) else {
        tracing::info!(
            chain_id,
            contract_address = %contract_address,
            last_updated_block = contract.last_updated_block,
            target_block = request.target_block,
            "no new blocks to sync"
        );
        return SyncOutcome::NoNewData {
            chain_id,
            contract_address,
            last_updated_block: contract.last_updated_block,
            target_block: request.target_block,
        };
    };

    match plan.mode {
        SyncMode::Backfill => tracing::info!(
            chain_id,
            contract_address = %contract_address,
            from_block = plan.range.from_block,
            to_block = plan.range.to_block,
            "full backfill from contract creation"
        ),
        SyncMode::Incremental => tracing::info!(
            chain_id,
            contract_address = %contract_address,
            from_block = plan.range.from_block,
            to_block = plan.range.to_block,
            "incremental sync"
        ),
    }

    let logs = match client
        .get_logs(
            chain_id,
            &contract_address,
            plan.range.from_block,
            plan.range.to_block,
            config.blocks_per_batch,
        )
        .await
    {
        Ok(logs) => logs,
        Err(error) => {
            return SyncOutcome::Error {
                chain_id,
                contract_address,
                error: format!("failed to fetch logs: {error}"),
            }
        }
    };

    if let Err(error) = store.append(&config.raw_logs_table, &logs).await {
        return SyncOutcome::Error {
            chain_id,
            contract_address,
            error: format!("failed to write raw logs: {error}"),
        };
    }

    // Watermark advance is the last step, after the durable write. Failing
    // here is a soft failure: the data landed, and the next run re-fetches
    // the overlapping range.
    if let Err(error) =
        registry.update_last_synced_block(chain_id, &contract_address, plan.range.to_block).await
    {
        tracing::warn!(
            chain_id,
            contract_address = %contract_address,
            %error,
            "failed to advance watermark"
        );
    }

    SyncOutcome::Success {
        chain_id,
        contract_address,
        chain_name: contract.chain_name.clone(),
        contract_abi: contract.contract_abi.clone(),
        synced_from_block: plan.range.from_block,
        synced_to_block: plan.range.to_block,
        logs_count: logs.len(),
    }
}
