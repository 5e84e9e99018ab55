//! Error taxonomy for every backend interaction.

use thiserror::Error;

/// Message shown when a request could not complete at all.
pub const CONNECTIVITY_MESSAGE: &str = "Could not connect to server.";

/// Failure of a single backend operation.
///
/// The `Display` text is what the UI shows inline, so every variant carries a
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required field was missing or blank. Raised locally before any request;
    /// no backend status maps here.
    #[error("{0}")]
    Validation(String),
    /// Credentials, OTP or session token were rejected.
    #[error("{0}")]
    Auth(String),
    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Any other non-success status.
    #[error("{0}")]
    Server(String),
    /// The request never produced a response.
    #[error("Could not connect to server.")]
    Connectivity,
}

impl ApiError {
    /// Whether the session token should be considered dead.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    /// Map an HTTP error status to a variant, using `message` as the text.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Auth(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Server(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let msg = || "m".to_string();
        assert_eq!(ApiError::from_status(400, msg()), ApiError::Server(msg()));
        assert_eq!(ApiError::from_status(422, msg()), ApiError::Server(msg()));
        assert_eq!(ApiError::from_status(401, msg()), ApiError::Auth(msg()));
        assert_eq!(ApiError::from_status(403, msg()), ApiError::Auth(msg()));
        assert_eq!(ApiError::from_status(404, msg()), ApiError::NotFound(msg()));
        assert_eq!(ApiError::from_status(500, msg()), ApiError::Server(msg()));
        assert_eq!(ApiError::from_status(502, msg()), ApiError::Server(msg()));
    }

    #[test]
    fn test_connectivity_message() {
        assert_eq!(ApiError::Connectivity.to_string(), CONNECTIVITY_MESSAGE);
    }
}
