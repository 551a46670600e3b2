use super::normalizer::NormalizeOptions;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub vehicle_registry: RegistryConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Name of the request header carrying the session token
    pub auth_header: String,
    /// Prepended to the stored token in the header value
    pub token_prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono pattern for table and card dates
    pub date_format: String,
    pub currency_symbol: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    pub url: String,
    pub resource_id: String,
}

/// Default configuration embedded in the bundle
pub const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:3002/api/v1"
auth_header = "token"
token_prefix = "islam__"

[display]
date_format = "%d/%m/%Y"
currency_symbol = "₪"
log_level = "debug"

[vehicle_registry]
url = "https://data.gov.il/api/3/action/datastore_search"
resource_id = "053cea08-09bc-40ec-8f7a-156f0677aff3"
"#;

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3002/api/v1".to_string(),
            auth_header: "token".to_string(),
            token_prefix: "islam__".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%Y".to_string(),
            currency_symbol: "₪".to_string(),
            log_level: "debug".to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: "https://data.gov.il/api/3/action/datastore_search".to_string(),
            resource_id: "053cea08-09bc-40ec-8f7a-156f0677aff3".to_string(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            display: DisplayConfig::default(),
            vehicle_registry: RegistryConfig::default(),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Override,
    Default,
    /// An override was present but did not parse; carries the parse error
    InvalidOverride(String),
}

impl ConsoleConfig {
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: ConsoleConfig = toml::from_str(contents)?;
        if config.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }
        Ok(config)
    }

    /// Load configuration
    ///
    /// Search order:
    /// 1. The stored override, when present and valid
    /// 2. Falls back to the embedded default config
    pub fn resolve(override_toml: Option<&str>) -> (Self, ConfigSource) {
        match override_toml.filter(|s| !s.trim().is_empty()) {
            Some(contents) => match Self::from_toml(contents) {
                Ok(config) => (config, ConfigSource::Override),
                Err(err) => (Self::embedded(), ConfigSource::InvalidOverride(err.to_string())),
            },
            None => (Self::embedded(), ConfigSource::Default),
        }
    }

    fn embedded() -> Self {
        Self::from_toml(DEFAULT_CONFIG).unwrap_or_default()
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            date_format: self.display.date_format.clone(),
            currency_symbol: self.display.currency_symbol.clone(),
        }
    }

    /// Absolute URL of an API path such as `/insured/allInsured`.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
