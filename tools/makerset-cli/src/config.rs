//! CLI configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use makerset_commerce::cart::ShippingPolicy;
use makerset_commerce::Currency;
use makerset_data::{FetchPolicy, RetryPolicy, TimeoutConfig};
use serde::{Deserialize, Serialize};

/// Config file names searched for, nearest directory first.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["makerset.toml", ".makerset.toml", "makerset.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Cart currency and shipping rules.
    #[serde(default)]
    pub shipping: ShippingConfig,

    /// Local state directory.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: CliConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, mid-command.
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            bail!("api.base_url must start with http:// or https://, got {base:?}");
        }
        if self.api.timeout_ms == 0 {
            bail!("api.timeout_ms must be greater than zero");
        }
        self.shipping.currency()?;
        Ok(())
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the MakerSet backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for admin endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Per-attempt timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries for idempotent calls.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    2
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

impl ApiConfig {
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(
            TimeoutConfig::from_millis(self.timeout_ms),
            RetryPolicy::new(self.max_retries),
        )
    }
}

/// Cart currency and shipping rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingConfig {
    /// ISO code of the cart currency.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(flatten)]
    pub policy: ShippingPolicy,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            policy: ShippingPolicy::default(),
        }
    }
}

impl ShippingConfig {
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(self.currency.trim())
            .with_context(|| format!("Unsupported currency: {}", self.currency))
    }
}

/// Local state directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    ".makerset".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Log filter settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `info` or `makerset_data=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Generate a default makerset.toml config file.
pub fn generate_default_config() -> String {
    r#"# MakerSet client configuration

[api]
base_url = "http://localhost:3000"
# token = "..."
timeout_ms = 10000
max_retries = 2

[shipping]
currency = "EUR"
base_cost = 5.90
base_description = "Standard parcel"
free_over = 100.0
# per_kg = 1.50

[[shipping.tiers]]
min_items = 5
cost = 9.90
description = "Large parcel"

[storage]
dir = ".makerset"

[log]
level = "warn"
"#
    .to_string()
}
