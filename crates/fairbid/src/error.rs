use crate::config::{ConfigError, InvalidConfig};
use crate::matching::SpatialError;
use crate::payments::PaymentError;
use crate::telemetry::TelemetryError;
use crate::verification::VendorError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    DomainConfig(InvalidConfig),
    Spatial(SpatialError),
    Payment(PaymentError),
    Vendor(VendorError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::DomainConfig(err) => write!(f, "domain configuration error: {}", err),
            AppError::Spatial(err) => write!(f, "spatial lookup error: {}", err),
            AppError::Payment(err) => write!(f, "payment processor error: {}", err),
            AppError::Vendor(err) => write!(f, "verification vendor error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::DomainConfig(err) => Some(err),
            AppError::Spatial(err) => Some(err),
            AppError::Payment(err) => Some(err),
            AppError::Vendor(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Spatial(_) | AppError::Payment(_) | AppError::Vendor(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::DomainConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<InvalidConfig> for AppError {
    fn from(value: InvalidConfig) -> Self {
        Self::DomainConfig(value)
    }
}

impl From<SpatialError> for AppError {
    fn from(value: SpatialError) -> Self {
        Self::Spatial(value)
    }
}

impl From<PaymentError> for AppError {
    fn from(value: PaymentError) -> Self {
        Self::Payment(value)
    }
}

impl From<VendorError> for AppError {
    fn from(value: VendorError) -> Self {
        Self::Vendor(value)
    }
}
