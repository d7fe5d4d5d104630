use std::path::PathBuf;

use derive_more::Display;
use ethers::abi::Abi;

/// Parses an ABI document: either a bare array of descriptors or an object
/// wrapping that array under an `"abi"` key.
pub fn parse_abi(document: &str) -> Result<Abi, AbiError> {
    let value: serde_json::Value = serde_json::from_str(document)?;

    let entries = match value {
        serde_json::Value::Object(mut wrapper) if wrapper.contains_key("abi") => {
            wrapper.remove("abi").unwrap()
        }
        other => other,
    };

    Ok(serde_json::from_value(entries)?)
}

#[derive(Debug, Display)]
pub enum AbiError {
    #[display("ABI document is not valid: {_0}")]
    Parse(serde_json::Error),
    #[display("could not fetch ABI: {_0}")]
    Fetch(String),
}

impl From<serde_json::Error> for AbiError {
    fn from(value: serde_json::Error) -> Self {
        AbiError::Parse(value)
    }
}

/// Where contract ABIs live. The registry stores a location URI per
/// contract; the decode stage resolves it through this seam.
#[async_trait::async_trait]
pub trait AbiSource: Send + Sync {
    async fn fetch_abi(&self, location: &str) -> Result<Abi, AbiError>;
}

/// Resolves `http(s)` ABI locations.
#[derive(Clone, Debug, Default)]
pub struct HttpAbiSource {
    http: reqwest::Client,
}

impl HttpAbiSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AbiSource for HttpAbiSource {
    async fn fetch_abi(&self, location: &str) -> Result<Abi, AbiError> {
        let document = self
            .http
            .get(location)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| AbiError::Fetch(error.to_string()))?
            .text()
            .await
            .map_err(|error| AbiError::Fetch(error.to_string()))?;

        parse_abi(&document)
    }
}

/// Resolves ABI locations as paths under a base directory.
#[derive(Clone, Debug)]
pub struct FsAbiSource {
    base_dir: PathBuf,
}

impl FsAbiSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait::async_trait]
impl AbiSource for FsAbiSource {
    async fn fetch_abi(&self, location: &str) -> Result<Abi, AbiError> {
        let path = self.base_dir.join(location);

        let document = tokio::fs::read_to_string(&path)
            .await
            .map_err(|error| AbiError::Fetch(format!("{}: {error}", path.display())))?;

        parse_abi(&document)
    }
}
