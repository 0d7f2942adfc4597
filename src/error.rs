//! Error types for the finanzas client library.

/// All errors that can occur when using the finanzas client.
///
/// The report aggregator never produces errors; these cover the REST
/// provider and the few parsing entry points.
#[derive(Debug, thiserror::Error)]
pub enum FinanzasError {
    /// HTTP transport failed (connection, TLS, body read).
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be combined with a request path.
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder when it could not be read.
        message: String,
    },

    /// No bearer token was supplied to a client builder.
    #[error("no access token was provided")]
    MissingToken,

    /// A `YYYY-MM` month string could not be parsed.
    #[error("invalid month {input:?}, expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        input: String,
    },
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FinanzasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = FinanzasError::from(serde_err);
        assert!(matches!(err, FinanzasError::Serialization(_)));
        assert!(err.to_string().contains("serialization error"));
    }

    #[test]
    fn error_api_display() {
        let err = FinanzasError::Api {
            status: 401,
            message: "token inválido".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("token inválido"));
    }

    #[test]
    fn error_missing_token_display() {
        assert!(FinanzasError::MissingToken.to_string().contains("token"));
    }

    #[test]
    fn error_invalid_month_display() {
        let err = FinanzasError::InvalidMonth {
            input: "2024-13".to_owned(),
        };
        assert!(err.to_string().contains("2024-13"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FinanzasError>();
    }
}
