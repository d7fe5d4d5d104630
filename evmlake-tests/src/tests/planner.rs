#[cfg(test)]
mod tests {
    use crate::factory::{synced_contract, usdc_contract, USDC_CREATION_BLOCK};
    use evmlake::{plan, safe_head, BlockRange, SyncMode};

    #[test]
    fn backfills_from_the_creation_block() {
        let contract = usdc_contract();

        let plan = plan(&contract, USDC_CREATION_BLOCK + 500).unwrap();

        assert_eq!(plan.mode, SyncMode::Backfill);
        assert_eq!(plan.range.from_block, USDC_CREATION_BLOCK);
        assert_eq!(plan.range.to_block, USDC_CREATION_BLOCK + 500);
    }

    #[test]
    fn backfills_from_genesis_without_a_creation_block() {
        let mut contract = usdc_contract();
        contract.contract_creation_block = 0;

        let plan = plan(&contract, 1_000).unwrap();

        assert_eq!(plan.mode, SyncMode::Backfill);
        assert_eq!(plan.range.from_block, 0);
    }

    #[test]
    fn resumes_one_block_past_the_watermark() {
        let contract = synced_contract(19_999_000);

        let plan = plan(&contract, 20_000_000).unwrap();

        assert_eq!(plan.mode, SyncMode::Incremental);
        assert_eq!(plan.range.from_block, 19_999_001);
        assert_eq!(plan.range.to_block, 20_000_000);
    }

    #[test]
    fn plans_nothing_when_already_at_the_target() {
        let contract = synced_contract(20_000_000);

        assert!(plan(&contract, 20_000_000).is_none());
        assert!(plan(&contract, 19_999_999).is_none());
    }

    #[test]
    fn plans_the_first_sync_of_a_fresh_contract() {
        let mut contract = usdc_contract();
        contract.contract_creation_block = 18_000_000;

        let plan = plan(&contract, 18_000_500).unwrap();

        assert_eq!(plan.range, BlockRange::new(18_000_000, 18_000_500).unwrap());
    }

    #[test]
    fn safe_head_subtracts_the_reorg_buffer() {
        assert_eq!(safe_head(20_000_100, 50), 20_000_050);
        assert_eq!(safe_head(30, 50), 0);
    }

    #[test]
    fn an_inverted_range_is_not_constructible() {
        assert!(BlockRange::new(10, 9).is_none());
        assert_eq!(BlockRange::new(10, 10).unwrap().block_count(), 1);
    }
}
