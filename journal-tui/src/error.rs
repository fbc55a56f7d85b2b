use thiserror::Error;

/// Failure of a user-triggered action.
///
/// The `Display` text is what the user sees; none of these carry raw server
/// bodies except [`ActionError::RegistrationFailed`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// No session; the gate has already switched to the login screen.
    #[error("Please log in first.")]
    NoSession,
    #[error("{0}")]
    Validation(&'static str),
    #[error("Login failed!")]
    LoginFailed,
    #[error("Registration failed{}", registration_detail(.0))]
    RegistrationFailed(Option<String>),
    #[error("No entry found with this ID.")]
    EntryNotFound,
    #[error("Failed to fetch entry.")]
    FetchFailed,
    #[error("Failed to add entry")]
    AddFailed,
    #[error("Failed to update entry")]
    UpdateFailed,
    #[error("Failed to delete entry")]
    DeleteFailed,
    #[error("Entry is not being edited")]
    NotEditing,
    #[error("Failed to load admin dashboard")]
    AdminLoadFailed,
    #[error("Failed to create admin")]
    CreateAdminFailed,
}

impl ActionError {
    /// Whether the failure should be shown to the user at all.
    pub fn is_silent(&self) -> bool {
        matches!(self, ActionError::NoSession)
    }
}

fn registration_detail(message: &Option<String>) -> String {
    match message {
        Some(msg) => format!(": {}", msg),
        None => ".".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_failure_includes_server_text_when_present() {
        assert_eq!(
            ActionError::RegistrationFailed(Some("User exists".into())).to_string(),
            "Registration failed: User exists"
        );
        assert_eq!(
            ActionError::RegistrationFailed(None).to_string(),
            "Registration failed."
        );
    }

    #[test]
    fn only_missing_session_is_silent() {
        assert!(ActionError::NoSession.is_silent());
        assert!(!ActionError::LoginFailed.is_silent());
    }
}
