//! Chain of claims resolvers.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use claims_resolver_sdk::{AuthCredentials, Claims, ClaimsResolverClient, ClaimsResolverError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::ChainConfigError;
use crate::config::ClaimsResolverConfig;

struct NamedResolver {
    name: String,
    resolver: Arc<dyn ClaimsResolverClient>,
}

/// Ordered collection of resolvers tried until one yields meaningful claims.
///
/// Registration order is precedence order. The chain is immutable once built
/// and can be shared across request handlers without locking.
///
/// Policy:
/// - The first resolver returning meaningful claims wins; later ones are not invoked.
/// - Absent or empty claims mean "no opinion"; the next resolver is tried.
/// - A resolver error is logged and the next resolver is tried.
/// - When every resolver is exhausted the result is [`Claims::empty`], never an error.
pub struct ResolverChain {
    resolvers: Vec<NamedResolver>,
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl ResolverChain {
    /// Start building a chain.
    #[must_use]
    pub fn builder() -> ResolverChainBuilder {
        ResolverChainBuilder::default()
    }

    /// Build a chain from the configured precedence order.
    ///
    /// `available` holds every resolver the host can provide, keyed by name.
    /// Resolvers not named in the order are left out.
    ///
    /// # Errors
    ///
    /// - `EmptyOrder` if the order names no resolver
    /// - `UnknownResolver` if the order names a resolver that is not available
    /// - `DuplicateResolver` if the order names a resolver twice
    pub fn from_config(
        cfg: &ClaimsResolverConfig,
        available: impl IntoIterator<Item = (String, Arc<dyn ClaimsResolverClient>)>,
    ) -> Result<Self, ChainConfigError> {
        if cfg.order.is_empty() {
            return Err(ChainConfigError::EmptyOrder);
        }

        let mut available: HashMap<String, Arc<dyn ClaimsResolverClient>> =
            available.into_iter().collect();
        let mut seen = HashSet::new();
        let mut builder = Self::builder();

        for name in &cfg.order {
            if !seen.insert(name.as_str()) {
                return Err(ChainConfigError::DuplicateResolver { name: name.clone() });
            }
            let resolver = available
                .remove(name)
                .ok_or_else(|| ChainConfigError::UnknownResolver { name: name.clone() })?;
            builder = builder.with(name.clone(), resolver);
        }

        for name in available.keys() {
            info!(resolver = %name, "Claims resolver not in configured order, skipping");
        }

        let chain = builder.build();
        info!(order = ?chain.names().collect::<Vec<_>>(), "Claims resolver chain built");
        Ok(chain)
    }

    /// Resolver names in precedence order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resolvers.iter().map(|r| r.name.as_str())
    }

    /// Number of registered resolvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// `true` if no resolver is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Resolve the caller's claims.
    ///
    /// Returns [`Claims::empty`] when no resolver has an opinion.
    pub async fn resolve(&self, credentials: &AuthCredentials) -> Claims {
        // A token nobody holds never fires, so cancellation cannot happen here.
        self.resolve_with_cancellation(credentials, &CancellationToken::new())
            .await
            .unwrap_or_default()
    }

    /// Resolve the caller's claims, giving up as soon as `cancel` fires.
    ///
    /// The token belongs to the calling RPC layer and bounds the whole
    /// authentication step. Every delegated call is raced against it; nothing
    /// is retried.
    ///
    /// # Errors
    ///
    /// `Cancelled` if `cancel` fires before a meaningful result is found.
    /// Resolver errors are never propagated.
    #[tracing::instrument(skip_all, fields(resolvers = self.resolvers.len()))]
    pub async fn resolve_with_cancellation(
        &self,
        credentials: &AuthCredentials,
        cancel: &CancellationToken,
    ) -> Result<Claims, ClaimsResolverError> {
        for entry in &self.resolvers {
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(resolver = %entry.name, "Claims resolution cancelled");
                    return Err(ClaimsResolverError::Cancelled);
                }
                outcome = entry.resolver.resolve(credentials) => outcome,
            };

            match outcome {
                Ok(Some(claims)) if claims.is_meaningful() => {
                    debug!(resolver = %entry.name, "Claims resolved");
                    return Ok(claims);
                }
                Ok(_) => debug!(resolver = %entry.name, "Claims resolver has no opinion"),
                Err(e) => {
                    warn!(resolver = %entry.name, error = %e, "Claims resolver failed, trying next");
                }
            }
        }

        debug!("No claims resolver recognised the caller");
        Ok(Claims::empty())
    }
}

#[async_trait]
impl ClaimsResolverClient for ResolverChain {
    async fn resolve(
        &self,
        credentials: &AuthCredentials,
    ) -> Result<Option<Claims>, ClaimsResolverError> {
        let claims = ResolverChain::resolve(self, credentials).await;
        Ok(claims.is_meaningful().then_some(claims))
    }
}

/// Builder for [`ResolverChain`].
#[derive(Default)]
pub struct ResolverChainBuilder {
    resolvers: Vec<NamedResolver>,
}

impl ResolverChainBuilder {
    /// Append a resolver. It is tried after every resolver added before it.
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        resolver: Arc<dyn ClaimsResolverClient>,
    ) -> Self {
        self.resolvers.push(NamedResolver {
            name: name.into(),
            resolver,
        });
        self
    }

    /// Finish the chain in the order resolvers were added.
    #[must_use]
    pub fn build(self) -> ResolverChain {
        ResolverChain {
            resolvers: self.resolvers,
        }
    }
}
