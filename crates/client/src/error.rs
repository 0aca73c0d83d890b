/// Errors from the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// The server's `error` field, or the raw body when it has none.
        message: String,
    },

    /// Reading or writing the persisted token failed.
    #[error("Token store error: {0}")]
    TokenStore(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
