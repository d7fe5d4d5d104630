use crate::ranges::BlockRange;
use crate::registry::ContractRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncMode {
    /// Never synced before; start from the contract's creation block.
    Backfill,
    /// Resume one block past the watermark.
    Incremental,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncPlan {
    pub mode: SyncMode,
    pub range: BlockRange,
}

/// Computes the block range to fetch for a contract given the chain's safe
/// head (`target_block`, already reorg-buffered by the caller). Returns
/// `None` when the contract is already synced to the target; the watermark
/// must not move in that case.
pub fn plan(contract: &ContractRecord, target_block: u64) -> Option<SyncPlan> {
    let (mode, from_block) = if contract.last_updated_block == 0 {
        let from_block = if contract.contract_creation_block > 0 {
            contract.contract_creation_block
        } else {
            0
        };

        (SyncMode::Backfill, from_block)
    } else {
        (SyncMode::Incremental, contract.last_updated_block + 1)
    };

    BlockRange::new(from_block, target_block).map(|range| SyncPlan { mode, range })
}

/// Safe head for a chain: the latest block minus the reorg buffer, so blocks
/// still vulnerable to reorganization are never ingested as final.
pub fn safe_head(latest_block: u64, reorg_buffer: u64) -> u64 {
    latest_block.saturating_sub(reorg_buffer)
}
