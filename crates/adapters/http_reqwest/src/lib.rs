//! # disarmrelay-adapter-http-reqwest
//!
//! [`DisarmHttpClient`] implementation over `reqwest`.
//!
//! The client only moves bytes: it posts the disarm command, attaches the
//! bearer token when one is configured, and hands the raw reply back to the
//! executor for classification. Transport-level failures are mapped into the
//! connection branch of the error taxonomy here, because only this layer can
//! tell a refused socket from a completed exchange.
//!
//! ## Dependency rule
//!
//! Depends on `disarmrelay-app` (port traits) and `disarmrelay-domain` only.

use disarmrelay_app::ports::{DisarmHttpClient, HttpReply};
use disarmrelay_domain::error::{ConnectionError, RelayError};
use disarmrelay_domain::strategy::HttpEndpoint;

/// Disarm client backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestDisarmClient {
    http: reqwest::Client,
}

impl ReqwestDisarmClient {
    /// Create a client with default transport settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing `reqwest::Client` (caller manages transport config).
    #[must_use]
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl DisarmHttpClient for ReqwestDisarmClient {
    async fn post_disarm(&self, endpoint: &HttpEndpoint) -> Result<HttpReply, RelayError> {
        let url = endpoint.disarm_url();
        tracing::debug!("POST {url}");

        let mut request = self.http.post(&url);
        if let Some(token) = &endpoint.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| transport_error(endpoint, &url, &err))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.map_err(|err| {
            RelayError::from(ConnectionError::Transport {
                url: url.clone(),
                detail: err.to_string(),
            })
        })?;

        Ok(HttpReply {
            status,
            content_type,
            body,
        })
    }
}

fn transport_error(endpoint: &HttpEndpoint, url: &str, err: &reqwest::Error) -> RelayError {
    if err.is_connect() {
        ConnectionError::Refused {
            port: endpoint.port,
        }
        .into()
    } else {
        ConnectionError::Transport {
            url: url.to_owned(),
            detail: err.to_string(),
        }
        .into()
    }
}
