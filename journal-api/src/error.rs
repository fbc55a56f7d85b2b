use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Not found")]
    NotFound { body: String },
    #[error("Unauthorized ({status})")]
    Unauthorized { status: u16, body: String },
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("ResponseError: {0}")]
    Transport(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Classify a non-success status code. The body is kept on every
    /// status variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => ApiError::NotFound { body },
            401 | 403 => ApiError::Unauthorized { status, body },
            _ => ApiError::Status { status, body },
        }
    }

    pub fn not_found() -> Self {
        ApiError::NotFound {
            body: String::new(),
        }
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized {
            status: 401,
            body: String::new(),
        }
    }

    /// Text the server sent along with a failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { body }
            | ApiError::Unauthorized { body, .. }
            | ApiError::Status { body, .. } => Some(body.trim()).filter(|b| !b.is_empty()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert_eq!(ApiError::from_status(404, String::new()), ApiError::not_found());
        assert_eq!(ApiError::from_status(401, String::new()), ApiError::unauthorized());
        assert_eq!(
            ApiError::from_status(403, "nope".into()),
            ApiError::Unauthorized {
                status: 403,
                body: "nope".into()
            }
        );
        assert_eq!(
            ApiError::from_status(500, "boom".into()),
            ApiError::Status {
                status: 500,
                body: "boom".into()
            }
        );
    }

    #[test]
    fn server_message_skips_blank_bodies() {
        assert_eq!(
            ApiError::from_status(409, "  User exists \n".into()).server_message(),
            Some("User exists")
        );
        assert_eq!(ApiError::from_status(500, "  ".into()).server_message(), None);
        assert_eq!(ApiError::not_found().server_message(), None);
    }

    #[test]
    fn server_message_survives_auth_and_not_found_statuses() {
        assert_eq!(
            ApiError::from_status(403, "Registration closed".into()).server_message(),
            Some("Registration closed")
        );
        assert_eq!(
            ApiError::from_status(404, " no such route ".into()).server_message(),
            Some("no such route")
        );
    }
}
