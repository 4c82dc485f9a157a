//! Binance-specific error types.

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors from the Binance adapter.
#[derive(Debug, Error, Clone)]
pub enum BinanceError {
    /// HTTP transport failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API returned an error payload.
    #[error("API error {code}: {message}")]
    Api {
        /// Binance error code, e.g. `-1121` for an invalid symbol.
        code: i64,
        /// Error message from the API.
        message: String,
    },

    /// Credentials were rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Response body could not be parsed.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<BinanceError> for GatewayError {
    fn from(err: BinanceError) -> Self {
        match err {
            BinanceError::Http(msg) => Self::Network(msg),
            BinanceError::Api { code, message } => Self::Api { code, message },
            BinanceError::AuthenticationFailed => Self::AuthenticationFailed,
            BinanceError::JsonParse(msg) => Self::Parse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_maps_to_network() {
        let err: GatewayError = BinanceError::Http("connection refused".to_string()).into();
        assert!(matches!(err, GatewayError::Network(_)));
    }

    #[test]
    fn api_maps_to_api() {
        let err: GatewayError = BinanceError::Api {
            code: -1121,
            message: "Invalid symbol.".to_string(),
        }
        .into();
        match err {
            GatewayError::Api { code, message } => {
                assert_eq!(code, -1121);
                assert_eq!(message, "Invalid symbol.");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn auth_maps_to_auth() {
        let err: GatewayError = BinanceError::AuthenticationFailed.into();
        assert!(matches!(err, GatewayError::AuthenticationFailed));
    }

    #[test]
    fn parse_maps_to_parse() {
        let err: GatewayError = BinanceError::JsonParse("eof".to_string()).into();
        assert!(matches!(err, GatewayError::Parse(_)));
    }
}
