use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContractTarget, StageError};
use crate::chains;
use crate::client::{LogApi, LogClient};
use crate::config::Config;
use crate::planner;
use crate::registry::Registry;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FetchHeadInput {
    #[serde(default)]
    pub triggered_at: Option<DateTime<Utc>>,
}

/// Per-chain safe heads plus every contract annotated with its target
/// block. Chains whose head fetch failed are absent from `latest_blocks`,
/// their contracts dropped for this run and the failures listed in
/// `errors`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeadReport {
    pub latest_blocks: BTreeMap<String, u64>,
    pub contracts: Vec<ContractTarget>,
    pub triggered_at: Option<DateTime<Utc>>,
    pub reorg_buffer: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

pub async fn run<A: LogApi, R: Registry>(
    input: &FetchHeadInput,
    registry: &R,
    client: &LogClient<A>,
    config: &Config,
) -> Result<HeadReport, StageError> {
    let contracts = registry.get_contracts().await?;
    tracing::info!(count = contracts.len(), "contracts registered for this run");

    let mut report = HeadReport {
        latest_blocks: BTreeMap::new(),
        contracts: vec![],
        triggered_at: input.triggered_at,
        reorg_buffer: config.reorg_buffer,
        errors: vec![],
    };

    if contracts.is_empty() {
        return Ok(report);
    }

    let chain_ids: BTreeSet<u64> =
        contracts.iter().map(|contract| contract.chain_id).filter(|id| *id != 0).collect();

    for chain_id in chain_ids {
        match client.get_latest_block(chain_id).await {
            Ok(latest_block) => {
                let safe_block = planner::safe_head(latest_block, config.reorg_buffer);
                tracing::info!(
                    chain_id,
                    chain = %chains::chain_name(chain_id),
                    latest_block,
                    safe_block,
                    "fetched chain head"
                );
                report.latest_blocks.insert(chain_id.to_string(), safe_block);
            }
            Err(error) => {
                tracing::warn!(chain_id, %error, "chain head fetch failed");
                report
                    .errors
                    .push(format!("failed to get latest block for chain {chain_id}: {error}"));
            }
        }
    }

    for contract in contracts {
        match report.latest_blocks.get(&contract.chain_id.to_string()) {
            Some(target_block) => report.contracts.push(ContractTarget {
                target_block: *target_block,
                contract,
            }),
            None => tracing::debug!(
                chain_id = contract.chain_id,
                contract_address = %contract.contract_address,
                "skipping contract, no head for its chain"
            ),
        }
    }

    Ok(report)
}
