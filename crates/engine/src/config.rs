//! Catalog configuration via `geocatalog.toml`
//!
//! Every field has a default, so an empty file is a valid configuration.
//! On first start a commented default file can be written next to the
//! service; to change settings, edit it and restart. A few settings may also
//! be overridden from the environment (see [`CatalogConfig::apply_env`]).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use geocatalog_core::{Error, Result, DEFAULT_LIMIT, MAX_LIMIT};
use url::Url;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "geocatalog.toml";

/// Environment variable: spatial store host
pub const ENV_STORE_HOST: &str = "GEOCATALOG_STORE_HOST";
/// Environment variable: spatial store port
pub const ENV_STORE_PORT: &str = "GEOCATALOG_STORE_PORT";
/// Environment variable: public base URL
pub const ENV_BASE_URL: &str = "GEOCATALOG_BASE_URL";

const DEFAULT_STORE_PORT: &str = "9851";

/// Catalog configuration loaded from `geocatalog.toml`
///
/// # Example
///
/// ```toml
/// store_url = "redis://localhost:9851"
/// base_url = "http://localhost:8080/"
/// delete_ttl_ms = 100
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Spatial store endpoint
    pub store_url: String,
    /// Public base URL used for hypermedia links
    pub base_url: String,
    /// Bucket holding items
    pub items_bucket: String,
    /// Bucket holding collections
    pub collections_bucket: String,
    /// Soft-delete expiry in milliseconds
    pub delete_ttl_ms: u64,
    /// Search page size when the request names none
    pub default_limit: usize,
    /// Upper bound for a requested page size
    pub max_limit: usize,
    /// Expiry sweep period of the in-memory store, in milliseconds
    pub sweep_interval_ms: u64,
    /// Default `tracing` filter directive
    pub log_filter: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            store_url: format!("redis://localhost:{}", DEFAULT_STORE_PORT),
            base_url: "http://localhost:8080/".to_string(),
            items_bucket: "stac_items".to_string(),
            collections_bucket: "collections".to_string(),
            delete_ttl_ms: 100,
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            sweep_interval_ms: 50,
            log_filter: "info".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Geocatalog configuration
#
# Spatial store endpoint. Overridden by GEOCATALOG_STORE_HOST / GEOCATALOG_STORE_PORT.
store_url = "redis://localhost:9851"

# Public base URL for generated links. Overridden by GEOCATALOG_BASE_URL.
base_url = "http://localhost:8080/"

# Store buckets
items_bucket = "stac_items"
collections_bucket = "collections"

# Deletes are soft: the record expires after this many milliseconds.
delete_ttl_ms = 100

# Search page size: default and upper bound
default_limit = 10
max_limit = 10000

# Expiry sweep period for the in-memory store (milliseconds)
sweep_interval_ms = 50

# Default log filter; RUST_LOG takes precedence
log_filter = "info"
"#
    }

    /// Parse config from TOML text and validate it
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the text does not parse or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: CatalogConfig = toml::from_str(content)
            .map_err(|e| Error::invalid_input(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidInput(reason) => {
                Error::InvalidInput(format!("{} ({})", reason, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::invalid_input(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Apply overrides from the process environment
    ///
    /// See [`apply_env_from`](Self::apply_env_from).
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup
    ///
    /// `GEOCATALOG_STORE_HOST` (with optional `GEOCATALOG_STORE_PORT`, default
    /// 9851) replaces `store_url`; `GEOCATALOG_BASE_URL` replaces `base_url`.
    /// The result is validated again.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_STORE_HOST) {
            let port = lookup(ENV_STORE_PORT).unwrap_or_else(|| DEFAULT_STORE_PORT.to_string());
            self.store_url = format!("redis://{}:{}", host, port);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        self.validate()
    }

    /// Check invariants and normalise `base_url` to end in `/`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field.
    pub fn validate(&mut self) -> Result<()> {
        let base = Url::parse(&self.base_url).map_err(|e| {
            Error::invalid_input(format!("base_url '{}' is not a URL: {}", self.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::invalid_input(format!(
                "base_url '{}' cannot be a base URL",
                self.base_url
            )));
        }
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }

        if self.items_bucket.is_empty() || self.collections_bucket.is_empty() {
            return Err(Error::invalid_input("bucket names must not be empty"));
        }
        if self.items_bucket == self.collections_bucket {
            return Err(Error::invalid_input(
                "items_bucket and collections_bucket must differ",
            ));
        }
        if self.max_limit == 0 {
            return Err(Error::invalid_input("max_limit must be at least 1"));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(Error::invalid_input(format!(
                "default_limit must be within 1..={}",
                self.max_limit
            )));
        }
        if self.sweep_interval_ms == 0 {
            return Err(Error::invalid_input("sweep_interval_ms must be at least 1"));
        }
        Ok(())
    }

    /// Parsed `base_url`
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_input(format!("base_url: {}", e)))
    }

    /// Soft-delete expiry
    pub fn delete_ttl(&self) -> Duration {
        Duration::from_millis(self.delete_ttl_ms)
    }

    /// Expiry sweep period
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}
