//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `disarmrelay.toml` in the working directory. Every field has a
//! default so the file is optional; the defaults select the HTTP strategy,
//! which needs no further options. Environment variables take precedence
//! over file values.

use serde::Deserialize;

use disarmrelay_domain::strategy::{HttpEndpoint, ResolutionStrategy};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Alarm resolution settings.
    pub alarm: AlarmConfig,
    /// HTTP control endpoint settings (strategy `http`).
    pub http: HttpConfig,
    /// Simulated-host settings.
    pub simulation: SimulationConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// How the target alarm accessory is located.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    /// Resolution strategy.
    pub strategy: StrategyKind,
    /// Exact display name of the alarm accessory (strategies `name-match`
    /// and `bridge`).
    pub name: String,
}

/// Strategy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    NameMatch,
    Heuristic,
    Bridge,
    #[default]
    Http,
}

/// HTTP control endpoint.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Endpoint host.
    pub host: String,
    /// Endpoint TCP port.
    pub port: u16,
    /// Bearer token; the Authorization header is omitted when absent.
    pub token: Option<String>,
}

/// Simulated-host toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed a simulated security-system accessory on startup.
    pub seed_alarm: bool,
}

impl Config {
    /// Load configuration from `disarmrelay.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// selected strategy is missing a required option.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("disarmrelay.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DISARMRELAY_STRATEGY") {
            if let Some(kind) = StrategyKind::parse(&val) {
                self.alarm.strategy = kind;
            }
        }
        if let Ok(val) = std::env::var("DISARMRELAY_ALARM_NAME") {
            self.alarm.name = val;
        }
        if let Ok(val) = std::env::var("DISARMRELAY_HTTP_HOST") {
            self.http.host = val;
        }
        if let Ok(val) = std::env::var("DISARMRELAY_HTTP_PORT") {
            if let Ok(port) = val.parse() {
                self.http.port = port;
            }
        }
        if let Ok(val) = std::env::var("DISARMRELAY_HTTP_TOKEN") {
            self.http.token = Some(val);
        }
        if let Ok(val) = std::env::var("DISARMRELAY_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.alarm.strategy {
            StrategyKind::NameMatch | StrategyKind::Bridge if self.alarm.name.is_empty() => {
                Err(ConfigError::Validation(format!(
                    "alarm.name must be set for strategy {:?}",
                    self.alarm.strategy
                )))
            }
            StrategyKind::Http if self.http.port == 0 => Err(ConfigError::Validation(
                "http.port must be non-zero".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Build the immutable resolution strategy for this process.
    #[must_use]
    pub fn strategy(&self) -> ResolutionStrategy {
        match self.alarm.strategy {
            StrategyKind::NameMatch => ResolutionStrategy::NameMatch {
                alarm_name: self.alarm.name.clone(),
            },
            StrategyKind::Heuristic => ResolutionStrategy::Heuristic,
            StrategyKind::Bridge => ResolutionStrategy::BridgeTraversal {
                alarm_name: self.alarm.name.clone(),
            },
            StrategyKind::Http => ResolutionStrategy::Http(HttpEndpoint {
                host: self.http.host.clone(),
                port: self.http.port,
                token: self.http.token.clone(),
            }),
        }
    }
}

impl StrategyKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name-match" => Some(Self::NameMatch),
            "heuristic" => Some(Self::Heuristic),
            "bridge" => Some(Self::Bridge),
            "http" => Some(Self::Http),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "disarmrelayd=info,disarmrelay=info".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8582,
            token: None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { seed_alarm: true }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.alarm.strategy, StrategyKind::Http);
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8582);
        assert!(config.http.token.is_none());
        assert!(config.simulation.seed_alarm);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.http.port, 8582);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [logging]
            filter = 'debug'

            [alarm]
            strategy = 'name-match'
            name = 'Somfy Home Alarm'

            [http]
            host = '192.168.1.10'
            port = 8581
            token = 'secret'

            [simulation]
            seed_alarm = false
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.alarm.strategy, StrategyKind::NameMatch);
        assert_eq!(config.alarm.name, "Somfy Home Alarm");
        assert_eq!(config.http.host, "192.168.1.10");
        assert_eq!(config.http.port, 8581);
        assert_eq!(config.http.token.as_deref(), Some("secret"));
        assert!(!config.simulation.seed_alarm);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.http.port, 8582);
    }

    #[test]
    fn should_reject_name_match_without_alarm_name() {
        let mut config = Config::default();
        config.alarm.strategy = StrategyKind::NameMatch;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_name_match_with_alarm_name() {
        let mut config = Config::default();
        config.alarm.strategy = StrategyKind::NameMatch;
        config.alarm.name = "Somfy Home Alarm".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_zero_http_port() {
        let mut config = Config::default();
        config.http.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_not_require_alarm_name_for_heuristic() {
        let mut config = Config::default();
        config.alarm.strategy = StrategyKind::Heuristic;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_build_name_match_strategy() {
        let mut config = Config::default();
        config.alarm.strategy = StrategyKind::NameMatch;
        config.alarm.name = "Somfy Home Alarm".to_string();

        let strategy = config.strategy();
        assert_eq!(
            strategy,
            ResolutionStrategy::NameMatch {
                alarm_name: "Somfy Home Alarm".to_string()
            }
        );
    }

    #[test]
    fn should_build_http_strategy_with_endpoint() {
        let config = Config::default();
        let strategy = config.strategy();
        assert_eq!(
            strategy,
            ResolutionStrategy::Http(HttpEndpoint {
                host: "127.0.0.1".to_string(),
                port: 8582,
                token: None,
            })
        );
    }

    #[test]
    fn should_parse_strategy_kind_from_kebab_case() {
        assert_eq!(StrategyKind::parse("name-match"), Some(StrategyKind::NameMatch));
        assert_eq!(StrategyKind::parse("bridge"), Some(StrategyKind::Bridge));
        assert_eq!(StrategyKind::parse("nope"), None);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
