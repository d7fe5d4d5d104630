#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::factory::{polygon_contract, usdc_contract, StubApi};
    use evmlake::stages::fetch_head;
    use evmlake::{Config, FetchHeadInput, LogClient, MemoryRegistry};

    fn config() -> Config {
        Config::new("test-api-key")
    }

    fn client(api: StubApi) -> LogClient<StubApi> {
        LogClient::with_rate_limit(api, Duration::ZERO)
    }

    #[tokio::test]
    async fn annotates_every_contract_with_its_chain_safe_head() {
        let registry = MemoryRegistry::new();
        registry.register(usdc_contract()).await;
        registry.register(polygon_contract()).await;

        let api = StubApi::new()
            .with_latest_block(1, 20_000_100)
            .with_latest_block(137, 50_000_100);

        let report =
            fetch_head::run(&FetchHeadInput::default(), &registry, &client(api), &config())
                .await
                .unwrap();

        assert_eq!(report.reorg_buffer, 50);
        assert_eq!(report.latest_blocks.get("1"), Some(&20_000_050));
        assert_eq!(report.latest_blocks.get("137"), Some(&50_000_050));
        assert_eq!(report.contracts.len(), 2);
        assert!(report.errors.is_empty());

        let mainnet = report.contracts.iter().find(|c| c.contract.chain_id == 1).unwrap();
        assert_eq!(mainnet.target_block, 20_000_050);
    }

    #[tokio::test]
    async fn a_failed_chain_drops_only_its_own_contracts() {
        let registry = MemoryRegistry::new();
        registry.register(usdc_contract()).await;
        registry.register(polygon_contract()).await;

        // Only mainnet has a stubbed head; polygon's fetch fails.
        let api = StubApi::new().with_latest_block(1, 20_000_100);

        let report =
            fetch_head::run(&FetchHeadInput::default(), &registry, &client(api), &config())
                .await
                .unwrap();

        assert_eq!(report.contracts.len(), 1);
        assert_eq!(report.contracts[0].contract.chain_id, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("chain 137"));
    }

    #[tokio::test]
    async fn an_empty_registry_short_circuits() {
        let registry = MemoryRegistry::new();
        let api = StubApi::new();

        let report =
            fetch_head::run(&FetchHeadInput::default(), &registry, &client(api), &config())
                .await
                .unwrap();

        assert!(report.latest_blocks.is_empty());
        assert!(report.contracts.is_empty());
    }

    #[tokio::test]
    async fn the_report_serializes_with_original_field_names() {
        let registry = MemoryRegistry::new();
        registry.register(usdc_contract()).await;
        let api = StubApi::new().with_latest_block(1, 20_000_100);

        let report =
            fetch_head::run(&FetchHeadInput::default(), &registry, &client(api), &config())
                .await
                .unwrap();

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["latest_blocks"]["1"], 20_000_050);
        assert_eq!(value["contracts"][0]["target_block"], 20_000_050);
        assert_eq!(value["contracts"][0]["chain_id"], 1);
        assert!(value.get("errors").is_none());
    }
}
