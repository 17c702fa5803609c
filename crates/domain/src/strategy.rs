//! Resolution strategy — how the target alarm accessory is located.
//!
//! Selected once from configuration and immutable for the process lifetime.
//! The variants are mutually exclusive; each carries exactly the data its
//! resolution path needs.

/// Strategy for locating the alarm accessory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// Enumerate the host's accessories and require an exact display-name
    /// match. No partial or fuzzy matching.
    NameMatch { alarm_name: String },
    /// Enumerate the host's accessories and classify candidates by name
    /// substring or manufacturer tag; first candidate with a security-system
    /// service wins.
    Heuristic,
    /// Enumerate the host's *bridged* accessory list (an explicitly granted
    /// capability) and apply the same exact-name match.
    BridgeTraversal { alarm_name: String },
    /// Skip the host's object model entirely and command the alarm through
    /// an out-of-process HTTP control endpoint.
    Http(HttpEndpoint),
}

/// Address of the out-of-process disarm endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpEndpoint {
    pub host: String,
    pub port: u16,
    /// Bearer token; the Authorization header is omitted when absent.
    pub token: Option<String>,
}

impl HttpEndpoint {
    /// The full URL the disarm command is posted to.
    #[must_use]
    pub fn disarm_url(&self) -> String {
        format!("http://{}:{}/disarm", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_disarm_url_from_host_and_port() {
        let endpoint = HttpEndpoint {
            host: "127.0.0.1".to_string(),
            port: 8582,
            token: None,
        };
        assert_eq!(endpoint.disarm_url(), "http://127.0.0.1:8582/disarm");
    }
}
