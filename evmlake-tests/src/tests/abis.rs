#[cfg(test)]
mod tests {
    use rand::Rng;

    use crate::factory::{ERC20_ABI, WRAPPED_ERC20_ABI};
    use evmlake::{parse_abi, AbiError, AbiSource, FsAbiSource};

    #[test]
    fn parses_a_bare_event_array() {
        let abi = parse_abi(ERC20_ABI).unwrap();

        assert!(abi.event("Transfer").is_ok());
    }

    #[test]
    fn unwraps_an_object_carrying_an_abi_key() {
        let abi = parse_abi(WRAPPED_ERC20_ABI).unwrap();

        assert!(abi.event("Transfer").is_ok());
    }

    #[test]
    fn rejects_documents_that_are_not_abis() {
        assert!(matches!(parse_abi("not json"), Err(AbiError::Parse(_))));
        assert!(matches!(parse_abi(r#"{"events": 3}"#), Err(AbiError::Parse(_))));
    }

    #[tokio::test]
    async fn fs_source_resolves_locations_under_its_base_dir() {
        let base_dir = std::env::temp_dir();
        let file_name = format!("evmlake-abi-{}.json", rand::thread_rng().gen_range(0..u64::MAX));
        std::fs::write(base_dir.join(&file_name), ERC20_ABI).unwrap();

        let source = FsAbiSource::new(&base_dir);
        let abi = source.fetch_abi(&file_name).await.unwrap();

        assert!(abi.event("Transfer").is_ok());

        std::fs::remove_file(base_dir.join(&file_name)).ok();
    }

    #[tokio::test]
    async fn fs_source_reports_missing_documents() {
        let source = FsAbiSource::new(std::env::temp_dir());

        let error = source.fetch_abi("evmlake-no-such-abi.json").await.unwrap_err();

        assert!(matches!(error, AbiError::Fetch(_)));
    }
}
