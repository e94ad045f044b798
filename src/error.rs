use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (offline, CORS, aborted).
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded {status}: {message}")]
    Http { status: u16, message: String },
    /// 2xx response carrying `success: false`.
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Short text suitable for a banner; server-provided reasons pass through.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => "Could not reach the server.".to_string(),
            ClientError::Http { message, .. } if !message.is_empty() => message.clone(),
            ClientError::Http { status, .. } => format!("Server error ({status})."),
            ClientError::Rejected(message) if !message.is_empty() => message.clone(),
            ClientError::Rejected(_) => "The action was rejected.".to_string(),
            ClientError::Decode(_) => "Unexpected server response.".to_string(),
            ClientError::Storage(_) => "Local save is unavailable.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_messages_pass_through() {
        let err = ClientError::Http {
            status: 400,
            message: "Not enough resources".into(),
        };
        assert_eq!(err.user_message(), "Not enough resources");
        let err = ClientError::Rejected(String::new());
        assert_eq!(err.user_message(), "The action was rejected.");
    }

    #[test]
    fn empty_http_message_mentions_status() {
        let err = ClientError::Http {
            status: 502,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "Server error (502).");
        assert!(err.to_string().contains("502"));
    }
}
