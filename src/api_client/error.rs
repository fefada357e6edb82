use thiserror::Error;

/// Failure of a request made through [`ApiClient`](super::ApiClient)
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS, TLS or timeout failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status; `message` is the best-effort server message
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            ApiError::Serialization(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_displays_message_only() {
        let err = ApiError::Status {
            status: 400,
            message: "bad input".to_string(),
        };
        assert_eq!(err.to_string(), "bad input");
        assert_eq!(err.status(), Some(400));
    }
}
