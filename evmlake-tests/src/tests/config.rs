#[cfg(test)]
mod tests {
    use std::time::Duration;

    use evmlake::{Config, ConfigError, DEFAULT_REORG_BUFFER};

    #[test]
    fn carries_the_documented_defaults() {
        let config = Config::new("test-api-key");

        assert_eq!(config.reorg_buffer, DEFAULT_REORG_BUFFER);
        assert_eq!(config.rate_limit_interval, Duration::from_millis(200));
        assert_eq!(config.blocks_per_batch, 10_000);
        assert_eq!(config.raw_logs_table, "raw_logs");
        assert_eq!(config.decoded_logs_table, "decoded_logs");
        assert_eq!(config.max_concurrency, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides_apply() {
        let config = Config::new("test-api-key")
            .with_reorg_buffer(12)
            .with_blocks_per_batch(500)
            .with_rate_limit_interval(Duration::from_millis(50))
            .with_max_concurrency(2);

        assert_eq!(config.reorg_buffer, 12);
        assert_eq!(config.blocks_per_batch, 500);
        assert_eq!(config.rate_limit_interval, Duration::from_millis(50));
        assert_eq!(config.max_concurrency, 2);
    }

    #[test]
    fn validation_rejects_unusable_configs() {
        assert!(matches!(
            Config::new("").validate(),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            Config::new("key").with_blocks_per_batch(0).validate(),
            Err(ConfigError::ZeroBatchSize)
        ));
    }
}
