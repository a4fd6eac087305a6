use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("FAIRBID_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("FAIRBID_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("FAIRBID_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("FAIRBID_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "FAIRBID_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "FAIRBID_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

/// Raised when an injected domain configuration is malformed.
///
/// Weight tables, threshold ladders, and fee schedules are injected values;
/// a table that does not sum to 1.0 or a ladder with inverted bounds is a
/// programming error and is rejected when the owning component is
/// constructed, never at call time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidConfig {
    #[error("{context}: weights sum to {sum}, expected 1.0")]
    WeightSum { context: &'static str, sum: f64 },
    #[error("{context}: bounds inverted ({lower} is not below {upper})")]
    InvertedBounds {
        context: &'static str,
        lower: f64,
        upper: f64,
    },
    #[error("{context}: rate {value} is outside [0, 1)")]
    RateOutOfRange { context: &'static str, value: f64 },
    #[error("{context}: limit must be at least 1")]
    ZeroLimit { context: &'static str },
}

/// Tolerance for weight-sum checks; the production tables are expressed as
/// two-decimal fractions, so anything beyond this is a genuine mistake.
pub(crate) const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

pub(crate) fn check_weight_sum(context: &'static str, sum: f64) -> Result<(), InvalidConfig> {
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(InvalidConfig::WeightSum { context, sum });
    }
    Ok(())
}

pub(crate) fn check_ordered(
    context: &'static str,
    lower: f64,
    upper: f64,
) -> Result<(), InvalidConfig> {
    if lower >= upper {
        return Err(InvalidConfig::InvertedBounds {
            context,
            lower,
            upper,
        });
    }
    Ok(())
}

pub(crate) fn check_rate(context: &'static str, value: f64) -> Result<(), InvalidConfig> {
    if !(0.0..1.0).contains(&value) {
        return Err(InvalidConfig::RateOutOfRange { context, value });
    }
    Ok(())
}
