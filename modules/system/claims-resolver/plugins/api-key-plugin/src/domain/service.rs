//! Service implementation for the API key plugin.

use std::sync::Arc;

use claims_resolver_sdk::{AuthCredentials, Claims, extract_token};
use secrecy::ExposeSecret;

use super::store::{ApiKeyConfigError, ApiKeyStore};
use crate::config::ApiKeyPluginConfig;

/// API key claims resolver.
///
/// Looks up the primary credential in the key table. Every input it does not
/// recognise is "no opinion" so other schemes further down a chain still get
/// a chance:
/// - no primary token, or a blank one
/// - a scheme other than `bearer`
/// - an unknown key
#[derive(Debug, Clone)]
pub struct Service {
    store: Arc<ApiKeyStore>,
}

impl Service {
    /// Create a service over an already parsed key table.
    #[must_use]
    pub fn new(store: Arc<ApiKeyStore>) -> Self {
        Self { store }
    }

    /// Create a service from plugin configuration.
    ///
    /// # Errors
    ///
    /// Any [`ApiKeyConfigError`] from parsing the key table.
    pub fn from_config(cfg: &ApiKeyPluginConfig) -> Result<Self, ApiKeyConfigError> {
        let store = ApiKeyStore::parse(cfg.keys.expose_secret())?;
        tracing::info!(keys = store.len(), "API key resolver initialized");
        Ok(Self::new(Arc::new(store)))
    }

    /// Shared handle to the key table.
    #[must_use]
    pub fn store(&self) -> &Arc<ApiKeyStore> {
        &self.store
    }

    /// Resolve the claims granted to the primary credential, if any.
    #[must_use]
    pub fn resolve(&self, credentials: &AuthCredentials) -> Option<Claims> {
        let raw = credentials.auth_token()?;
        let token = extract_token(raw);
        if token.is_empty() {
            return None;
        }
        if carries_foreign_scheme(token) {
            tracing::debug!("Credential uses a non-bearer scheme, not an API key");
            return None;
        }

        let claims = self.store.get(token);
        if claims.is_none() {
            tracing::debug!("Unknown API key");
        }
        claims.cloned()
    }
}

/// After bearer stripping, any remaining whitespace means the value still
/// starts with a scheme word, and not ours.
fn carries_foreign_scheme(token: &str) -> bool {
    token.contains(char::is_whitespace)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use claims_resolver_sdk::Role;
    use secrecy::SecretString;
    use tracing_test::traced_test;

    use super::*;

    fn service(keys: &str) -> Service {
        let cfg = ApiKeyPluginConfig {
            keys: SecretString::from(keys.to_owned()),
        };
        Service::from_config(&cfg).unwrap()
    }

    #[test]
    fn absent_credentials_have_no_opinion() {
        let svc = service("test-key:reader:test-namespace");

        assert!(svc.resolve(&AuthCredentials::absent()).is_none());
    }

    #[test]
    fn blank_tokens_have_no_opinion() {
        let svc = service("test-key:reader:test-namespace");

        for token in ["", "   ", "Bearer ", "Bearer    "] {
            assert!(
                svc.resolve(&AuthCredentials::new(token)).is_none(),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn known_key_resolves_in_every_accepted_form() {
        let svc = service("valid-key:writer:my-namespace;admin-key:admin:*");

        for token in [
            "valid-key",
            "bearer valid-key",
            "Bearer valid-key",
            "BeArEr valid-key",
            "Bearer   valid-key",
            "  valid-key  ",
        ] {
            let claims = svc
                .resolve(&AuthCredentials::new(token))
                .unwrap_or_else(|| panic!("token {token:?} should resolve"));
            assert_eq!(claims.subject, "valid-key");
            assert_eq!(claims.namespace_role("my-namespace"), Role::Writer);
            assert_eq!(claims.system, Role::Undefined);
        }

        let admin = svc.resolve(&AuthCredentials::new("admin-key")).unwrap();
        assert_eq!(admin.subject, "admin-key");
        assert_eq!(admin.system, Role::Admin);
        assert!(admin.namespaces.is_empty());
    }

    #[test]
    fn unknown_keys_have_no_opinion() {
        let svc = service("valid-key:reader:test-namespace");

        for token in [
            "invalid-key",
            "Bearer invalid-key",
            "valid",
            "valid-key-extra",
        ] {
            assert!(
                svc.resolve(&AuthCredentials::new(token)).is_none(),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn foreign_scheme_has_no_opinion() {
        let svc = service("xyz:admin:*;valid-key:reader:ns");

        for token in ["Basic xyz", "Token valid-key", "Bearer Basic xyz"] {
            assert!(
                svc.resolve(&AuthCredentials::new(token)).is_none(),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn secondary_slot_is_ignored() {
        let svc = service("valid-key:reader:ns");

        let credentials = AuthCredentials::new("nope").with_extra_data("valid-key");
        assert!(svc.resolve(&credentials).is_none());
    }

    #[test]
    #[traced_test]
    fn construction_logs_key_count_without_keys() {
        let _svc = service("key1:reader:ns1;key2:writer:ns2");

        assert!(logs_contain("API key resolver initialized"));
        assert!(logs_contain("keys=2"));
        assert!(!logs_contain("key1"));
    }

    #[test]
    fn invalid_config_fails_construction() {
        let cfg = ApiKeyPluginConfig::default();

        let err = Service::from_config(&cfg).unwrap_err();
        assert_eq!(err, ApiKeyConfigError::NoValidKeys);
    }
}
