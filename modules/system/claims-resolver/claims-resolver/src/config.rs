//! Configuration for the claims resolver chain.

use serde::{Deserialize, Serialize};

/// Name under which the API key resolver is registered.
pub const API_KEY_RESOLVER: &str = "api_key";

/// Name under which the secondary-slot signed-token resolver is registered.
pub const EXTRA_DATA_JWT_RESOLVER: &str = "extra_data_jwt";

/// Configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClaimsResolverConfig {
    /// Resolver names in the order they are tried.
    ///
    /// API keys come first by default so a broken signed-token path cannot
    /// block API key logins.
    pub order: Vec<String>,
}

impl Default for ClaimsResolverConfig {
    fn default() -> Self {
        Self {
            order: vec![
                API_KEY_RESOLVER.to_owned(),
                EXTRA_DATA_JWT_RESOLVER.to_owned(),
            ],
        }
    }
}
