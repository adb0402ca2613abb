//! Claims Resolver SDK
//!
//! This crate provides the public contract shared by every claims resolver:
//!
//! - [`ClaimsResolverClient`] - The resolver contract
//! - [`Claims`] / [`Role`] - The authorization grant handed to the decision engine
//! - [`AuthCredentials`] - The credential bundle extracted from an inbound call
//! - [`ClaimsResolverError`] - Error types
//! - [`extract_token`] - Bearer scheme normalization
//!
//! ## Usage
//!
//! ```ignore
//! use claims_resolver_sdk::{AuthCredentials, ClaimsResolverClient};
//!
//! let credentials = AuthCredentials::new("Bearer app1-key");
//! if let Some(claims) = resolver.resolve(&credentials).await? {
//!     println!("{}", claims.subject);
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod credentials;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::ClaimsResolverClient;
pub use credentials::{BEARER_SCHEME, extract_token, starts_with_bearer};
pub use error::ClaimsResolverError;
pub use models::{AuthCredentials, Claims, Role, WILDCARD_NAMESPACE};
