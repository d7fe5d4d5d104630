/// A supported EVM chain network and its log-index API endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    pub id: u64,
    pub name: &'static str,
    pub api_url: &'static str,
}

const SUPPORTED_CHAINS: &[Chain] = &[
    Chain {
        id: 1,
        name: "ethereum",
        api_url: "https://api.etherscan.io/v2/api",
    },
    Chain {
        id: 5,
        name: "goerli",
        api_url: "https://api-goerli.etherscan.io/v2/api",
    },
    Chain {
        id: 11155111,
        name: "sepolia",
        api_url: "https://api-sepolia.etherscan.io/v2/api",
    },
    Chain {
        id: 137,
        name: "polygon",
        api_url: "https://api.polygonscan.com/v2/api",
    },
    Chain {
        id: 42161,
        name: "arbitrum",
        api_url: "https://api.arbiscan.io/v2/api",
    },
    Chain {
        id: 10,
        name: "optimism",
        api_url: "https://api-optimistic.etherscan.io/v2/api",
    },
    Chain {
        id: 8453,
        name: "base",
        api_url: "https://api.basescan.org/v2/api",
    },
];

pub fn get(chain_id: u64) -> Option<&'static Chain> {
    SUPPORTED_CHAINS.iter().find(|c| c.id == chain_id)
}

pub fn supported_ids() -> Vec<u64> {
    SUPPORTED_CHAINS.iter().map(|c| c.id).collect()
}

/// Display name for a chain id, whether supported or not.
pub fn chain_name(chain_id: u64) -> String {
    match get(chain_id) {
        Some(chain) => chain.name.to_string(),
        None => format!("chain_{chain_id}"),
    }
}
