use thiserror::Error;

/// Domain-specific errors for the etcd-backed topology service
#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("etcd request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("etcd returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Key {0} does not end in an IPv4 subnet")]
    InvalidKey(String),

    #[error("Key {0} has no value")]
    MissingValue(String),

    #[error("Invalid prefix {0:?}: must be a single path segment")]
    InvalidPrefix(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results using SidecarError
pub type SidecarResult<T> = Result<T, SidecarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = SidecarError::Status {
            status: 401,
            url: "http://localhost:2379/v2/keys/netswatch/network/subnets".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "etcd returned status 401 for http://localhost:2379/v2/keys/netswatch/network/subnets"
        );
    }

    #[test]
    fn invalid_key_display() {
        let err = SidecarError::InvalidKey("/netswatch/network/subnets/garbage".to_string());
        assert!(err.to_string().contains("does not end in an IPv4 subnet"));
    }

    #[test]
    fn error_conversion_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SidecarError = json_err.into();
        assert!(matches!(err, SidecarError::Json(_)));
    }
}
