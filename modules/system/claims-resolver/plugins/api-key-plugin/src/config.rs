//! Configuration for the API key plugin.

use secrecy::SecretString;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiKeyPluginConfig {
    /// Key table in `<key>:<role>:<namespace>;...` form.
    pub keys: SecretString,
}

impl Default for ApiKeyPluginConfig {
    fn default() -> Self {
        Self {
            keys: SecretString::from(String::new()),
        }
    }
}
