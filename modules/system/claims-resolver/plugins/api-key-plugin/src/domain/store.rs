//! Immutable API key table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use claims_resolver_sdk::{Claims, Role};
use thiserror::Error;

/// Separator between key table entries.
const ENTRY_SEPARATOR: char = ';';
/// Separator between the fields of one entry.
const FIELD_SEPARATOR: char = ':';
/// Characters of a malformed entry echoed back in errors.
const PREVIEW_CHARS: usize = 3;

/// Fatal key table errors. The process must refuse to serve on any of these.
///
/// Entries may contain secrets, so errors carry only a short prefix of a
/// malformed entry and only the length of a key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiKeyConfigError {
    /// An entry does not have exactly three `:`-separated fields.
    #[error("invalid key [{preview}...] format - expected <key>:<role>:<namespace>")]
    MalformedEntry { preview: String },

    /// One of the three fields of an entry is empty.
    #[error(
        "invalid key format: [<key>(len:{key_len}):<role>(val:{role}):<namespace>(val:{namespace})]"
    )]
    EmptyField {
        key_len: usize,
        role: String,
        namespace: String,
    },

    /// No entry was accepted.
    #[error("no valid keys")]
    NoValidKeys,
}

/// One parsed `<key>:<role>:<namespace>` entry.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyEntry {
    pub key: String,
    pub role: Role,
    /// `*` or a concrete namespace name.
    pub namespace: String,
}

impl fmt::Debug for ApiKeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyEntry")
            .field("key", &"[REDACTED]")
            .field("role", &self.role)
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl ApiKeyEntry {
    /// Parse a single entry.
    ///
    /// Returns `Ok(None)` for a blank entry. An unrecognised role is accepted
    /// and maps to [`Role::Undefined`].
    ///
    /// # Errors
    ///
    /// - `MalformedEntry` if the entry does not have exactly three fields
    /// - `EmptyField` if any field is empty after trimming
    pub fn parse(raw: &str) -> Result<Option<Self>, ApiKeyConfigError> {
        let entry = raw.trim();
        if entry.is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = entry.split(FIELD_SEPARATOR).map(str::trim).collect();
        let &[key, role, namespace] = fields.as_slice() else {
            return Err(ApiKeyConfigError::MalformedEntry {
                preview: entry.chars().take(PREVIEW_CHARS).collect(),
            });
        };

        if key.is_empty() || role.is_empty() || namespace.is_empty() {
            return Err(ApiKeyConfigError::EmptyField {
                key_len: key.len(),
                role: role.to_owned(),
                namespace: namespace.to_owned(),
            });
        }

        Ok(Some(Self {
            key: key.to_owned(),
            role: Role::from_name(role),
            namespace: namespace.to_owned(),
        }))
    }

    /// Claims granted by this entry. The key itself is the subject.
    #[must_use]
    pub fn to_claims(&self) -> Claims {
        Claims::for_namespace(self.key.clone(), &self.namespace, self.role)
    }
}

/// Immutable mapping from API key to the claims it grants.
///
/// Built once at startup and shared read-only afterwards; lookups need no
/// synchronization.
#[derive(Clone)]
pub struct ApiKeyStore {
    keys: HashMap<String, Claims>,
}

impl fmt::Debug for ApiKeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyStore")
            .field("key_count", &self.keys.len())
            .finish_non_exhaustive()
    }
}

impl ApiKeyStore {
    /// Parse a `;`-separated key table.
    ///
    /// Blank entries are skipped. A key that appears more than once keeps its
    /// last occurrence.
    ///
    /// # Errors
    ///
    /// - `MalformedEntry` / `EmptyField` for the first bad entry
    /// - `NoValidKeys` if no entry was accepted, including for an empty string
    pub fn parse(config: &str) -> Result<Self, ApiKeyConfigError> {
        let mut keys = HashMap::new();

        for raw in config.split(ENTRY_SEPARATOR) {
            let Some(entry) = ApiKeyEntry::parse(raw)? else {
                continue;
            };
            let claims = entry.to_claims();
            let key_len = entry.key.len();
            if keys.insert(entry.key, claims).is_some() {
                tracing::warn!(key_len, "Duplicate API key entry, last occurrence wins");
            }
        }

        if keys.is_empty() {
            return Err(ApiKeyConfigError::NoValidKeys);
        }

        Ok(Self { keys })
    }

    /// Exact-match lookup. The key is not normalized.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Claims> {
        self.keys.get(key)
    }

    /// Number of accepted keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false` for a successfully parsed store.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromStr for ApiKeyStore {
    type Err = ApiKeyConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
