//! Client implementation for the API key plugin.
//!
//! Implements `ClaimsResolverClient` using the domain service.

use async_trait::async_trait;
use claims_resolver_sdk::{AuthCredentials, Claims, ClaimsResolverClient, ClaimsResolverError};

use super::service::Service;

#[async_trait]
impl ClaimsResolverClient for Service {
    async fn resolve(
        &self,
        credentials: &AuthCredentials,
    ) -> Result<Option<Claims>, ClaimsResolverError> {
        Ok(Service::resolve(self, credentials))
    }
}
