use evmlake::{parse_abi, AbiError, AbiSource};

pub const ERC20_ABI: &str = r#"[
    {
        "anonymous": false,
        "inputs": [
            {"indexed": true, "name": "from", "type": "address"},
            {"indexed": true, "name": "to", "type": "address"},
            {"indexed": false, "name": "value", "type": "uint256"}
        ],
        "name": "Transfer",
        "type": "event"
    }
]"#;

/// The same document wrapped the way compiler artifacts ship it.
pub const WRAPPED_ERC20_ABI: &str = r#"{
    "contractName": "Token",
    "abi": [
        {
            "anonymous": false,
            "inputs": [
                {"indexed": true, "name": "from", "type": "address"},
                {"indexed": true, "name": "to", "type": "address"},
                {"indexed": false, "name": "value", "type": "uint256"}
            ],
            "name": "Transfer",
            "type": "event"
        }
    ]
}"#;

pub const DEPOSIT_ABI: &str = r#"[
    {
        "anonymous": false,
        "inputs": [
            {"indexed": true, "name": "id", "type": "bytes32"},
            {"indexed": false, "name": "payload", "type": "bytes"}
        ],
        "name": "Deposit",
        "type": "event"
    }
]"#;

/// ABI source serving one fixed document for every location.
#[derive(Clone, Debug)]
pub struct StaticAbiSource {
    pub document: &'static str,
}

impl StaticAbiSource {
    pub fn erc20() -> Self {
        Self { document: ERC20_ABI }
    }
}

#[async_trait::async_trait]
impl AbiSource for StaticAbiSource {
    async fn fetch_abi(&self, _location: &str) -> Result<ethers::abi::Abi, AbiError> {
        parse_abi(self.document)
    }
}
