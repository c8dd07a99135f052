use thiserror::Error;

/// Failure talking to the friends backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("fetch error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// The backend answered but refused the action (registration, request mutation).
    #[error("{0}")]
    Rejected(String),
    #[error("parse error: {0}")]
    Decode(String),
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl ApiError {
    /// Text suitable for showing next to the control that triggered the request.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::Rejected(message) => message.clone(),
            Self::Network(_) => "Could not reach the friends server.".to_string(),
            Self::Decode(_) | Self::MissingField(_) => {
                "The friends server sent an unexpected response.".to_string()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 400,
            message: "User does not exist".to_string(),
        };
        assert_eq!(err.user_message(), "User does not exist");
        assert_eq!(err.to_string(), "HTTP 400: User does not exist");
    }

    #[test]
    fn user_message_hides_transport_details() {
        let err = ApiError::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(err.user_message(), "Could not reach the friends server.");
    }
}
