#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::factory::{
        synced_contract, transfer_entry, usdc_contract, StubApi, USDC_CONTRACT_ADDRESS,
    };
    use evmlake::stages::sync_range;
    use evmlake::{
        Config, ContractTarget, Filter, LogClient, MemoryRegistry, MemoryStore, RawLogRecord,
        SyncOutcome, TableStore, RAW_LOGS_TABLE,
    };

    fn config() -> Config {
        Config::new("test-api-key")
    }

    fn client(api: StubApi) -> LogClient<StubApi> {
        LogClient::with_rate_limit(api, Duration::ZERO)
    }

    #[tokio::test]
    async fn backfills_appends_and_advances_the_watermark() {
        let registry = MemoryRegistry::new();
        let mut contract = usdc_contract();
        contract.contract_creation_block = 18_000_000;
        registry.register(contract.clone()).await;

        let store = MemoryStore::new();
        let api = StubApi::new().with_entries(vec![
            transfer_entry(18_000_010, 1),
            transfer_entry(18_000_020, 2),
        ]);
        let request = ContractTarget {
            contract,
            target_block: 18_000_500,
        };

        let outcome =
            sync_range::run(&request, &client(api), &registry, &store, &config()).await;

        assert_eq!(
            outcome,
            SyncOutcome::Success {
                chain_id: 1,
                contract_address: USDC_CONTRACT_ADDRESS.to_lowercase(),
                chain_name: "ethereum".to_string(),
                contract_abi: "abis/usdc.json".to_string(),
                synced_from_block: 18_000_000,
                synced_to_block: 18_000_500,
                logs_count: 2,
            }
        );

        let record = registry.get(1, USDC_CONTRACT_ADDRESS).await.unwrap();
        assert_eq!(record.last_updated_block, 18_000_500);

        let rows: Vec<RawLogRecord> = store
            .read(RAW_LOGS_TABLE, &[Filter::eq("chainid", 1)])
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn an_empty_range_reports_no_new_data_and_keeps_the_watermark() {
        let registry = MemoryRegistry::new();
        let contract = synced_contract(18_000_500);
        registry.register(contract.clone()).await;

        let store = MemoryStore::new();
        let request = ContractTarget {
            contract,
            target_block: 18_000_500,
        };

        let outcome =
            sync_range::run(&request, &client(StubApi::new()), &registry, &store, &config())
                .await;

        assert_eq!(
            outcome,
            SyncOutcome::NoNewData {
                chain_id: 1,
                contract_address: USDC_CONTRACT_ADDRESS.to_lowercase(),
                last_updated_block: 18_000_500,
                target_block: 18_000_500,
            }
        );

        let record = registry.get(1, USDC_CONTRACT_ADDRESS).await.unwrap();
        assert_eq!(record.last_updated_block, 18_000_500);
        assert!(!store.table_exists(RAW_LOGS_TABLE).await);
    }

    #[tokio::test]
    async fn missing_required_fields_fail_without_side_effects() {
        let registry = MemoryRegistry::new();
        let store = MemoryStore::new();
        let mut contract = usdc_contract();
        contract.chain_id = 0;
        let request = ContractTarget {
            contract,
            target_block: 18_000_500,
        };

        let outcome =
            sync_range::run(&request, &client(StubApi::new()), &registry, &store, &config())
                .await;

        assert!(matches!(outcome, SyncOutcome::Error { ref error, .. }
            if error.contains("missing required fields")));
        assert!(!store.table_exists(RAW_LOGS_TABLE).await);
    }

    #[tokio::test]
    async fn a_transport_failure_surfaces_as_a_structured_error() {
        let registry = MemoryRegistry::new();
        let contract = synced_contract(18_000_000);
        registry.register(contract.clone()).await;
        let store = MemoryStore::new();

        let api = StubApi::new().failing_logs();
        let request = ContractTarget {
            contract,
            target_block: 18_000_500,
        };

        let outcome =
            sync_range::run(&request, &client(api), &registry, &store, &config()).await;

        assert!(matches!(outcome, SyncOutcome::Error { ref error, .. }
            if error.contains("failed to fetch logs")));

        // The watermark must not move past data that never landed.
        let record = registry.get(1, USDC_CONTRACT_ADDRESS).await.unwrap();
        assert_eq!(record.last_updated_block, 18_000_000);
    }

    #[tokio::test]
    async fn a_logless_range_still_advances_the_watermark() {
        let registry = MemoryRegistry::new();
        let contract = synced_contract(18_000_000);
        registry.register(contract.clone()).await;
        let store = MemoryStore::new();

        let request = ContractTarget {
            contract,
            target_block: 18_000_500,
        };

        let outcome =
            sync_range::run(&request, &client(StubApi::new()), &registry, &store, &config())
                .await;

        assert!(matches!(outcome, SyncOutcome::Success { logs_count: 0, .. }));

        // Future incremental syncs must not re-scan the empty range.
        let record = registry.get(1, USDC_CONTRACT_ADDRESS).await.unwrap();
        assert_eq!(record.last_updated_block, 18_000_500);
        assert!(!store.table_exists(RAW_LOGS_TABLE).await);
    }

    #[tokio::test]
    async fn a_watermark_write_failure_is_soft() {
        // The contract is absent from the registry, so the watermark update
        // fails after the data write; ingestion still reports success.
        let registry = MemoryRegistry::new();
        let store = MemoryStore::new();

        let mut contract = usdc_contract();
        contract.last_updated_block = 18_000_000;
        let api = StubApi::new().with_entries(vec![transfer_entry(18_000_010, 1)]);
        let request = ContractTarget {
            contract,
            target_block: 18_000_500,
        };

        let outcome =
            sync_range::run(&request, &client(api), &registry, &store, &config()).await;

        assert!(matches!(outcome, SyncOutcome::Success { logs_count: 1, .. }));
        assert!(store.table_exists(RAW_LOGS_TABLE).await);
    }
}
