//! services/api/src/adapters/identity.rs
//!
//! The identity adapter shipped with the service. It accepts no bearer tokens,
//! so every caller is resolved by the anonymous-access policy in the web layer.

use async_trait::async_trait;
use itinerary_core::ports::{IdentityProvider, PortResult};
use tracing::debug;

#[derive(Clone, Default)]
pub struct AnonymousIdentityAdapter;

impl AnonymousIdentityAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityProvider for AnonymousIdentityAdapter {
    async fn resolve_user(&self, _bearer_token: &str) -> PortResult<Option<String>> {
        debug!("Bearer token presented but no identity provider is configured");
        Ok(None)
    }
}
