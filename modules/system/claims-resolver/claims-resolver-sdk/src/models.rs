//! Domain models shared by claims resolvers.

use std::collections::HashMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Namespace sentinel meaning "every namespace".
///
/// Never stored as a key of [`Claims::namespaces`]; a grant on this namespace
/// lands in [`Claims::system`] instead.
pub const WILDCARD_NAMESPACE: &str = "*";

/// Role granted to a caller, either system-wide or on one namespace.
///
/// Only equality is meaningful. `Undefined` is the zero value and grants nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No grant.
    #[default]
    Undefined,
    /// Read-only access.
    Reader,
    /// Read and write access.
    Writer,
    /// Access needed by task workers.
    Worker,
    /// Full access.
    Admin,
}

impl Role {
    const NAMED: [Self; 4] = [Self::Reader, Self::Writer, Self::Worker, Self::Admin];

    /// Map a role name to a [`Role`].
    ///
    /// Case-insensitive and whitespace-tolerant. Anything outside the closed
    /// vocabulary `reader`, `writer`, `worker`, `admin` (including the empty
    /// string) maps to [`Role::Undefined`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::NAMED
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Reader => "reader",
            Self::Writer => "writer",
            Self::Worker => "worker",
            Self::Admin => "admin",
        }
    }

    /// `true` for every role except [`Role::Undefined`].
    #[must_use]
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved authorization grant for a request.
///
/// Consumed by the authorization-decision engine: an operation on namespace `N`
/// is considered against `system` and `namespaces[N]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity of the caller. Empty if unresolved.
    #[serde(default)]
    pub subject: String,
    /// Role applying to every namespace.
    #[serde(default)]
    pub system: Role,
    /// Per-namespace roles. Never contains [`WILDCARD_NAMESPACE`] as a key.
    #[serde(default)]
    pub namespaces: HashMap<String, Role>,
}

impl Claims {
    /// Claims of an unknown caller: no subject, no grants.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Claims granting `role` on `namespace` to `subject`.
    ///
    /// A [`WILDCARD_NAMESPACE`] grant is routed into `system`.
    #[must_use]
    pub fn for_namespace(subject: impl Into<String>, namespace: &str, role: Role) -> Self {
        let mut claims = Self {
            subject: subject.into(),
            ..Self::default()
        };
        if namespace == WILDCARD_NAMESPACE {
            claims.system = role;
        } else {
            claims.namespaces.insert(namespace.to_owned(), role);
        }
        claims
    }

    /// `true` if these claims carry any grant at all.
    ///
    /// Claims that are not meaningful are equivalent to "no opinion" and must
    /// never be adopted as the final answer of a resolver chain.
    #[must_use]
    pub fn is_meaningful(&self) -> bool {
        self.system.is_defined() || !self.namespaces.is_empty()
    }

    /// Role granted explicitly on `namespace`, ignoring `system`.
    #[must_use]
    pub fn namespace_role(&self, namespace: &str) -> Role {
        self.namespaces.get(namespace).copied().unwrap_or_default()
    }
}

/// Credentials carried by an inbound call.
///
/// The primary slot holds the `Authorization` header value; the secondary slot
/// holds the auxiliary header some clients use to pass a signed token next to
/// an API key. Both are kept as [`SecretString`] so `Debug` output redacts them.
#[derive(Debug, Clone, Default)]
pub struct AuthCredentials {
    auth_token: Option<SecretString>,
    extra_data: Option<SecretString>,
}

impl AuthCredentials {
    /// Credentials with only the primary token set.
    #[must_use]
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: Some(SecretString::from(auth_token.into())),
            extra_data: None,
        }
    }

    /// Credentials with no primary token field at all.
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    /// Build credentials from both slots.
    #[must_use]
    pub fn from_parts(auth_token: Option<SecretString>, extra_data: Option<SecretString>) -> Self {
        Self {
            auth_token,
            extra_data,
        }
    }

    /// Set the secondary slot.
    #[must_use]
    pub fn with_extra_data(mut self, extra_data: impl Into<String>) -> Self {
        self.extra_data = Some(SecretString::from(extra_data.into()));
        self
    }

    /// Raw primary token, if the field is present.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Raw secondary token, if the field is present.
    #[must_use]
    pub fn extra_data(&self) -> Option<&str> {
        self.extra_data.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Consume the credentials and return both slots.
    #[must_use]
    pub fn into_parts(self) -> (Option<SecretString>, Option<SecretString>) {
        (self.auth_token, self.extra_data)
    }
}
