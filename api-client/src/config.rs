use serde::Deserialize;
use serde::Serialize;

/// Connection settings for one remote collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,

    /// Collection segment under the base URL, e.g. `jobs` or `companies`.
    pub collection: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            collection: collection.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base URL must not be empty".to_string());
        }
        if self.collection.trim().is_empty() {
            return Err("collection must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout must be > 0".to_string());
        }
        Ok(())
    }
}
