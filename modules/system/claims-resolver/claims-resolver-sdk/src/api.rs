//! Resolver contract.
//!
//! Every credential scheme (API keys, signed tokens, decorators around either)
//! implements this trait. `ResolverChain` holds resolvers by this trait only and
//! is agnostic to their concrete type.

use async_trait::async_trait;

use crate::error::ClaimsResolverError;
use crate::models::{AuthCredentials, Claims};

/// Derives [`Claims`] from the credentials of an inbound call.
///
/// ```ignore
/// let resolver: Arc<dyn ClaimsResolverClient> = Arc::new(service);
///
/// match resolver.resolve(&credentials).await? {
///     Some(claims) => { /* this resolver recognised the caller */ }
///     None => { /* no opinion, try the next scheme */ }
/// }
/// ```
#[async_trait]
pub trait ClaimsResolverClient: Send + Sync {
    /// Resolve the caller's claims.
    ///
    /// Returns `Ok(None)` when the credentials are not addressed to this
    /// resolver (absent, wrong scheme, unknown key). That is "no opinion",
    /// not a denial.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the credential is addressed to this resolver but invalid
    /// - `ServiceUnavailable` if a backing service (key fetch, introspection) is down
    /// - `Internal` for unexpected errors
    async fn resolve(
        &self,
        credentials: &AuthCredentials,
    ) -> Result<Option<Claims>, ClaimsResolverError>;
}
