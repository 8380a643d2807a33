//! Shared request executor used by every query interface.

use crate::config::ActivityConfig;
use crate::error::Result;
use crate::transport::{Endpoint, Transport, UpstreamResponse};

/// Owns the [`Transport`] and the policy caps for one SDK instance.
///
/// Query wrappers borrow an `ApiClient`; it holds no per-search state, so
/// one instance can serve concurrent searches.
pub struct ApiClient {
    transport: Box<dyn Transport>,
    config: ActivityConfig,
}

impl ApiClient {
    /// Create a client over `transport` with the given caps.
    pub fn new(transport: Box<dyn Transport>, config: ActivityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// Issue a GET for `endpoint`.
    pub fn get(&self, endpoint: &Endpoint<'_>) -> Result<UpstreamResponse> {
        tracing::debug!(path = %endpoint, "upstream request");
        let resp = self.transport.get(endpoint)?;
        tracing::debug!(path = %endpoint, status = resp.status, "upstream response");
        Ok(resp)
    }

    pub fn config(&self) -> &ActivityConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}
