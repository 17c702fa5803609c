//! Disarm error taxonomy.
//!
//! Every error is catchable at the disarm-pipeline boundary and carries
//! enough context for an operator to fix the configuration: the candidate
//! list on resolution failures, the URL/port on transport failures, the
//! status code and body on HTTP failures. Nothing here is fatal to the
//! process.

use crate::characteristic::CharacteristicType;
use crate::service::ServiceType;

/// Top-level error for the disarm pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Http(#[from] HttpError),
}

/// A required configuration option is missing.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no alarm name configured; set `alarm.name` to the alarm accessory's exact display name")]
    MissingAlarmName,
}

/// A host capability the strategy depends on is absent.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("accessory {accessory:?} exposes no {service} service")]
    MissingService {
        accessory: String,
        service: ServiceType,
    },

    #[error("accessory {accessory:?} exposes no {characteristic} characteristic")]
    MissingCharacteristic {
        accessory: String,
        characteristic: CharacteristicType,
    },

    #[error("the host did not grant access to its bridged accessory list")]
    BridgeUnavailable,
}

/// Resolution produced no candidate.
///
/// Always carries the full list of display names considered — the primary
/// tool for diagnosing a misconfigured alarm name.
#[derive(Debug, thiserror::Error)]
#[error("no accessory matched {} (considered: [{}])", .wanted, .candidates.join(", "))]
pub struct NotFoundError {
    pub wanted: String,
    pub candidates: Vec<String>,
}

impl NotFoundError {
    /// No accessory carried the configured display name.
    #[must_use]
    pub fn name(alarm_name: &str, candidates: Vec<String>) -> Self {
        Self {
            wanted: format!("name {alarm_name:?}"),
            candidates,
        }
    }

    /// No heuristic candidate exposed a security-system service.
    #[must_use]
    pub fn heuristic(candidates: Vec<String>) -> Self {
        Self {
            wanted: "the somfy/protect heuristic".to_string(),
            candidates,
        }
    }
}

/// The transport layer failed before any HTTP exchange completed.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("connection refused on port {port}")]
    Refused { port: u16 },

    #[error("transport failure talking to {url}: {detail}")]
    Transport { url: String, detail: String },
}

/// The endpoint answered, but not in the shape a disarm API would.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("expected a JSON response, got content-type {content_type:?}")]
    UnexpectedContentType { content_type: Option<String> },

    #[error(
        "port {port} answered with the host's own admin UI page; \
         the configured port collides with the host's reserved admin port"
    )]
    AdminPortCollision { port: u16 },

    #[error("response body is not valid JSON: {detail}")]
    MalformedBody { detail: String },
}

/// The endpoint answered with a non-success status.
#[derive(Debug, thiserror::Error)]
#[error("disarm endpoint returned HTTP {status}: {body}")]
pub struct HttpError {
    pub status: u16,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_list_every_candidate_in_not_found_message() {
        let err = NotFoundError::name(
            "Target Alarm",
            vec!["Other Device".to_string(), "Hallway Light".to_string()],
        );
        let message = err.to_string();
        assert!(message.contains("\"Target Alarm\""));
        assert!(message.contains("Other Device"));
        assert!(message.contains("Hallway Light"));
    }

    #[test]
    fn should_mention_heuristic_in_heuristic_not_found_message() {
        let err = NotFoundError::heuristic(vec!["Lamp".to_string()]);
        assert!(err.to_string().contains("heuristic"));
        assert!(err.to_string().contains("Lamp"));
    }

    #[test]
    fn should_carry_port_in_refused_connection_message() {
        let err = ConnectionError::Refused { port: 8582 };
        assert!(err.to_string().contains("8582"));
    }

    #[test]
    fn should_carry_status_and_body_in_http_error_message() {
        let err = HttpError {
            status: 503,
            body: "maintenance".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("maintenance"));
    }

    #[test]
    fn should_surface_inner_message_through_relay_error() {
        let err = RelayError::from(ConfigurationError::MissingAlarmName);
        assert!(err.to_string().contains("alarm name"));
    }

    #[test]
    fn should_name_missing_capability_in_discovery_error() {
        let err = DiscoveryError::MissingService {
            accessory: "Home Alarm".to_string(),
            service: ServiceType::SecuritySystem,
        };
        assert!(err.to_string().contains("SecuritySystem"));
        assert!(err.to_string().contains("Home Alarm"));
    }
}
