#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! API Key Claims Resolver Plugin
//!
//! Resolves static API keys to role grants. The key table is parsed once from
//! a compact configuration string and is immutable afterwards.
//!
//! ## Configuration
//!
//! ```yaml
//! api_key_plugin:
//!   keys: "app1-key:writer:app1-namespace;admin-key:admin:*"
//! ```
//!
//! Each `;`-separated entry is `<key>:<role>:<namespace>`. Roles are `reader`,
//! `writer`, `worker` or `admin`; a namespace of `*` grants the role system-wide.

pub mod config;
pub mod domain;

pub use config::ApiKeyPluginConfig;
pub use domain::{ApiKeyConfigError, ApiKeyEntry, ApiKeyStore, Service};
