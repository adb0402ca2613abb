//! Domain layer for the API key plugin.

pub mod client;
pub mod service;
pub mod store;

pub use service::Service;
pub use store::{ApiKeyConfigError, ApiKeyEntry, ApiKeyStore};
