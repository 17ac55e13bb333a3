//! Layered settings: built-in defaults, then an optional file, then
//! `CINEMAP_*` environment variables.
//!
//! Nested keys use a double underscore in the environment, so
//! `CINEMAP_API__API_KEY` sets `api.api_key` and `CINEMAP_CACHE__TTL_SECS`
//! sets `cache.ttl_secs`.

use crate::mapper::Populator;
use config::{Config, ConfigError, Environment, File, FileFormat, FileSourceFile, Map};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// File looked up in the working directory by [`Settings::load`]
pub const DEFAULT_FILE: &str = "cinemap";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "CINEMAP";

/// Client settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub cache: CacheSettings,
    pub mapper: MapperSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Load from `cinemap.{toml,json,yaml}` if present, then the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(Some(File::with_name(DEFAULT_FILE).required(false)), None)
    }

    /// Load from an explicit file and environment.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        Self::build(file.map(|path| File::from(path).required(true)), env)
    }

    fn build(
        file: Option<File<FileSourceFile, FileFormat>>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        debug!(
            base_url = %settings.api.base_url,
            cache = settings.cache.enabled,
            max_depth = settings.mapper.max_depth,
            "settings loaded"
        );

        Ok(settings)
    }
}

/// Service endpoint and request defaults
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Default `language` parameter, e.g. `en-US`
    pub language: Option<String>,
    /// Default `region` parameter (ISO 3166-1)
    pub region: Option<String>,
    pub include_adult: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            language: None,
            region: None,
            include_adult: false,
            timeout_secs: 30,
            user_agent: concat!("cinemap/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("region", &self.region)
            .field("include_adult", &self.include_adult)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Response cache settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub max_entries: u64,
    /// Time to live in seconds
    pub ttl_secs: u64,
}

impl CacheSettings {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 1000,
            ttl_secs: 3600, // 1 hour
        }
    }
}

/// Populator settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapperSettings {
    pub max_depth: usize,
    /// Log every undeclared document key at debug level
    pub log_unknown_keys: bool,
}

impl MapperSettings {
    /// Populator configured from these settings
    #[must_use]
    pub fn populator(&self) -> Populator {
        let populator = Populator::new().with_max_depth(self.max_depth);
        if !self.log_unknown_keys {
            return populator;
        }

        populator.on_unknown_key(|unknown| {
            debug!(
                type_name = unknown.type_name,
                key = unknown.key,
                path = %unknown.path,
                "unknown document key"
            );
        })
    }
}

impl Default for MapperSettings {
    fn default() -> Self {
        Self {
            max_depth: Populator::DEFAULT_MAX_DEPTH,
            log_unknown_keys: false,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directives used when `RUST_LOG` is unset
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
