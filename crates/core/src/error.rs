use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("timeout after {0}ms")]
    Timeout(u64),

    #[error("unexpected status {0}")]
    Status(u16),

    /// Structured failure payload returned by the backend
    #[error("server rejected request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ClientError {
    /// Message the backend attached to a rejection. Blank messages count
    /// as absent.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Server { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_server_errors() {
        let err = ClientError::Server {
            status: 409,
            message: Some("Email already exists".into()),
        };
        assert_eq!(err.server_message(), Some("Email already exists"));
        assert_eq!(ClientError::Status(500).server_message(), None);
        assert_eq!(ClientError::Timeout(5000).to_string(), "timeout after 5000ms");
    }

    #[test]
    fn test_blank_server_message_is_absent() {
        for blank in ["", "   "] {
            let err = ClientError::Server {
                status: 400,
                message: Some(blank.into()),
            };
            assert_eq!(err.server_message(), None);
        }
    }
}
