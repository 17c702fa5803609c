//! HTTP port — the out-of-process disarm control endpoint, consumed.

use std::future::Future;

use disarmrelay_domain::error::RelayError;
use disarmrelay_domain::strategy::HttpEndpoint;

/// Raw reply from the disarm endpoint, before classification.
///
/// The executor owns the classification rules (status ranges, content-type
/// checks, admin-UI detection); the client only moves bytes.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Client for `POST /disarm` on the configured endpoint.
pub trait DisarmHttpClient: Send + Sync {
    /// Issue the disarm request.
    ///
    /// Transport-level failures surface as [`RelayError::Connection`]; any
    /// completed HTTP exchange, success or not, yields a reply for the
    /// executor to classify.
    fn post_disarm(
        &self,
        endpoint: &HttpEndpoint,
    ) -> impl Future<Output = Result<HttpReply, RelayError>> + Send;
}
