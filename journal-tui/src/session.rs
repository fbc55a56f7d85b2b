use journal_api::{ApiError, Credentials, JournalApi, NewUser, Probe};
use tracing::{debug, info, warn};

use crate::error::ActionError;

/// The screen currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    #[default]
    Login,
    Register,
    Dashboard,
    AdminDashboard,
}

/// Decided once per login by probing the admin-only endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

/// The credential token and username of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    credentials: Credentials,
    role: Role,
}

impl Session {
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Owns the one session of this run and the screen routing that follows it.
///
/// Lifecycle: `Anonymous -> login -> Authenticated { role } -> logout -> Anonymous`.
/// Every privileged action goes through [`SessionGate::require_session`] first.
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    session: Option<Session>,
    surface: Surface,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn show_login(&mut self) {
        self.surface = Surface::Login;
    }

    pub fn show_register(&mut self) {
        self.surface = Surface::Register;
    }

    /// Check the credentials against the backend and, on success, establish
    /// the session and route to the dashboard matching the user's role.
    ///
    /// Both a listing and a 404 from `/journal` prove the credentials valid,
    /// since an empty journal is reported as not found.
    pub async fn login(
        &mut self,
        api: &dyn JournalApi,
        username: &str,
        password: &str,
    ) -> Result<Role, ActionError> {
        let (username, password) = (username.trim(), password.trim());
        if username.is_empty() || password.is_empty() {
            return Err(ActionError::Validation("Please enter username and password."));
        }

        let credentials = Credentials::new(username, password).map_err(|e| {
            warn!(error = %e, "could not build credentials");
            ActionError::LoginFailed
        })?;

        match api.probe(&credentials, Probe::Journal).await {
            Ok(()) | Err(ApiError::NotFound { .. }) => {}
            Err(e) => {
                warn!(username, error = %e, "login check rejected");
                return Err(ActionError::LoginFailed);
            }
        }

        let role = match api.probe(&credentials, Probe::AdminUsers).await {
            Ok(()) => Role::Admin,
            Err(e) => {
                debug!(username, error = %e, "admin check failed, treating as regular user");
                Role::User
            }
        };

        self.session = Some(Session { credentials, role });
        self.surface = match role {
            Role::Admin => Surface::AdminDashboard,
            Role::User => Surface::Dashboard,
        };
        info!(username, ?role, "session established");

        Ok(role)
    }

    /// Create an account. Does not log in; routes back to the login screen.
    pub async fn register(
        &mut self,
        api: &dyn JournalApi,
        username: &str,
        password: &str,
    ) -> Result<(), ActionError> {
        let (username, password) = (username.trim(), password.trim());
        if username.is_empty() || password.is_empty() {
            return Err(ActionError::Validation(
                "Please enter both username and password.",
            ));
        }

        api.create_user(&NewUser::user(username, password))
            .await
            .map_err(|e| {
                warn!(username, error = %e, "registration failed");
                ActionError::RegistrationFailed(e.server_message().map(str::to_string))
            })?;

        info!(username, "user registered");
        self.surface = Surface::Login;
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(username = session.username(), "logged out");
        }
        self.surface = Surface::Login;
    }

    /// The current session, or [`ActionError::NoSession`] after switching to
    /// the login screen. Never refreshes or re-derives a token.
    pub fn require_session(&mut self) -> Result<Session, ActionError> {
        match &self.session {
            Some(session) => Ok(session.clone()),
            None => {
                warn!("no active session, showing login");
                self.surface = Surface::Login;
                Err(ActionError::NoSession)
            }
        }
    }
}
