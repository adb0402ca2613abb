//! Layered configuration for `claims-check`.
//!
//! Sources, lowest precedence first:
//! 1. the YAML file passed with `--config`
//! 2. `TEMPORAL_API_KEYS`, mapped to `api_key_plugin.keys`
//! 3. `CLAIMS_*` variables, nested with `__` (e.g. `CLAIMS_LOGGING__LEVEL`)

use std::path::Path;

use anyhow::{Context, bail};
use api_key_plugin::ApiKeyPluginConfig;
use claims_resolver::ClaimsResolverConfig;
use claims_resolver::config::API_KEY_RESOLVER;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;

/// Variable the key table was historically read from.
pub const LEGACY_KEYS_VAR: &str = "TEMPORAL_API_KEYS";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "CLAIMS_";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub claims_resolver: ClaimsResolverConfig,
    pub api_key_plugin: ApiKeyPluginConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        // No signed-token engine is linked into this binary.
        Self {
            logging: LoggingConfig::default(),
            claims_resolver: ClaimsResolverConfig {
                order: vec![API_KEY_RESOLVER.to_owned()],
            },
            api_key_plugin: ApiKeyPluginConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path` (if given) and the environment.
    ///
    /// # Errors
    ///
    /// Fails if `path` does not exist or any source does not match the
    /// configuration shape.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path
            && !path.is_file()
        {
            bail!("config file {} not found", path.display());
        }

        Self::figment(path)
            .extract()
            .context("failed to load configuration")
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(
                Env::raw()
                    .only(&[LEGACY_KEYS_VAR])
                    .map(|_| "api_key_plugin.keys".into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
