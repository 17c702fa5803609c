//! Disarm executor — issues the disarm command and classifies the outcome.
//!
//! Exactly one attempt per activation in every strategy; the user re-triggers
//! the switch to retry.

use disarmrelay_domain::characteristic::{CharacteristicType, CharacteristicValue, DISARM};
use disarmrelay_domain::error::{HttpError, ProtocolError, RelayError};
use disarmrelay_domain::service::ServiceType;
use disarmrelay_domain::strategy::HttpEndpoint;
use disarmrelay_domain::target::ResolvedTarget;

use crate::ports::{CharacteristicWriter, Disarmed, DisarmHttpClient, HttpReply};

/// An HTML body naming the host's admin UI means the configured port points
/// at the host's own web interface, not a disarm API.
const ADMIN_UI_MARKER: &str = "homebridge";

/// Commands a resolved target to disarm.
pub struct DisarmExecutor<W, H> {
    writer: W,
    http: H,
}

impl<W: CharacteristicWriter, H: DisarmHttpClient> DisarmExecutor<W, H> {
    /// Create an executor over the given characteristic writer and HTTP client.
    pub fn new(writer: W, http: H) -> Self {
        Self { writer, http }
    }

    /// Send the disarm command to the target.
    ///
    /// # Errors
    ///
    /// Registry targets propagate whatever the host's characteristic set
    /// reports. HTTP targets classify the exchange: non-2xx becomes
    /// [`RelayError::Http`], a non-JSON reply becomes [`RelayError::Protocol`]
    /// (with a port-collision hint when the body is the host's admin UI),
    /// and a refused connection arrives as [`RelayError::Connection`].
    #[tracing::instrument(skip(self, target))]
    pub async fn execute(&self, target: &ResolvedTarget) -> Result<Disarmed, RelayError> {
        match target {
            ResolvedTarget::Registry {
                accessory_id,
                display_name,
            } => {
                self.writer
                    .write(
                        *accessory_id,
                        ServiceType::SecuritySystem,
                        CharacteristicType::SecuritySystemTargetState,
                        CharacteristicValue::UInt8(DISARM),
                    )
                    .await?;
                tracing::info!(accessory = %display_name, "sent disarm command");
                Ok(Disarmed::default())
            }
            ResolvedTarget::Endpoint(endpoint) => {
                tracing::info!(url = %endpoint.disarm_url(), "posting disarm command");
                let reply = self.http.post_disarm(endpoint).await?;
                classify(endpoint, reply)
            }
        }
    }
}

fn classify(endpoint: &HttpEndpoint, reply: HttpReply) -> Result<Disarmed, RelayError> {
    if !(200..300).contains(&reply.status) {
        return Err(HttpError {
            status: reply.status,
            body: reply.body,
        }
        .into());
    }

    if !is_json(reply.content_type.as_deref()) {
        if looks_like_admin_ui(&reply.body) {
            return Err(ProtocolError::AdminPortCollision {
                port: endpoint.port,
            }
            .into());
        }
        return Err(ProtocolError::UnexpectedContentType {
            content_type: reply.content_type,
        }
        .into());
    }

    let body = serde_json::from_str(&reply.body).map_err(|err| ProtocolError::MalformedBody {
        detail: err.to_string(),
    })?;
    Ok(Disarmed {
        response: Some(body),
    })
}

/// `application/json` and any `+json` suffixed media type count as JSON.
fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|raw| raw.parse::<mime::Mime>().ok())
        .is_some_and(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
}

fn looks_like_admin_ui(body: &str) -> bool {
    let lowered = body.to_lowercase();
    lowered.contains("<html") && lowered.contains(ADMIN_UI_MARKER)
}
