use evmlake::ContractRecord;

pub const USDC_CONTRACT_ADDRESS: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
pub const USDC_CREATION_BLOCK: u64 = 6_082_465;

pub fn usdc_contract() -> ContractRecord {
    let mut record =
        ContractRecord::new(1, USDC_CONTRACT_ADDRESS, "abis/usdc.json", USDC_CREATION_BLOCK);
    record.contract_creation_date = "2018-08-03".to_string();

    record
}

pub fn synced_contract(last_updated_block: u64) -> ContractRecord {
    let mut record = usdc_contract();
    record.last_updated_block = last_updated_block;

    record
}

pub fn polygon_contract() -> ContractRecord {
    ContractRecord::new(
        137,
        "0x2791bca1f2de4661ed88a30c99a7a9449aa84174",
        "abis/usdc-polygon.json",
        25_825_898,
    )
}
