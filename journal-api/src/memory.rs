use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::{
    ApiError, Credentials, EntryDraft, EntryId, JournalApi, JournalEntry, NewUser, Probe, User,
    ROLE_ADMIN, ROLE_USER,
};

/// In-memory stand-in for the journal backend.
///
/// Mirrors the status codes the real server produces: an empty journal is a
/// 404, admin endpoints reject non-admins, unknown credentials are rejected
/// everywhere except the public endpoints. Used by dev mode and tests.
///
/// ```
/// use journal_api::MemoryJournalApi;
///
/// let api = MemoryJournalApi::new()
///     .with_user("alice", "pw1")
///     .with_entry("alice", "First", "Hello")
///     .with_admin("root", "secret");
/// assert_eq!(api.request_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryJournalApi {
    state: Arc<Mutex<MemoryState>>,
    requests: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<StoredUser>,
    next_id: u64,
}

#[derive(Debug, Clone)]
struct StoredUser {
    user_name: String,
    password: String,
    roles: Vec<String>,
    entries: Vec<JournalEntry>,
}

impl StoredUser {
    fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ROLE_ADMIN)
    }

    fn entry_mut(&mut self, id: &EntryId) -> Result<&mut JournalEntry, ApiError> {
        self.entries
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(ApiError::not_found)
    }
}

impl MemoryState {
    fn next_entry_id(&mut self) -> EntryId {
        self.next_id += 1;
        EntryId::new(format!("{:024x}", self.next_id))
    }

    fn insert_user(&mut self, user: &NewUser, roles: Vec<String>) -> Result<(), ApiError> {
        if user.user_name.trim().is_empty() || user.password.is_empty() {
            return Err(ApiError::Status {
                status: 400,
                body: "userName and password are required".to_string(),
            });
        }
        if self.users.iter().any(|u| u.user_name == user.user_name) {
            return Err(ApiError::Status {
                status: 409,
                body: format!("User {} already exists", user.user_name),
            });
        }

        self.users.push(StoredUser {
            user_name: user.user_name.clone(),
            password: user.password.clone(),
            roles,
            entries: vec![],
        });
        Ok(())
    }

    /// Resolve credentials the way the server does: from the wire header.
    fn authenticate(&mut self, credentials: &Credentials) -> Result<&mut StoredUser, ApiError> {
        let (username, password) =
            Credentials::decode_authorization_header(&credentials.authorization_header())
                .map_err(|_| ApiError::unauthorized())?;

        self.users
            .iter_mut()
            .find(|u| u.user_name == username && u.password == password)
            .ok_or_else(ApiError::unauthorized)
    }

    fn authenticate_admin(
        &mut self,
        credentials: &Credentials,
    ) -> Result<&mut StoredUser, ApiError> {
        let user = self.authenticate(credentials)?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(ApiError::unauthorized())
        }
    }
}

impl MemoryJournalApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular user.
    pub fn with_user(self, user_name: &str, password: &str) -> Self {
        {
            let mut state = self.lock();
            let _ = state.insert_user(
                &NewUser::user(user_name, password),
                vec![ROLE_USER.to_string()],
            );
        }
        self
    }

    /// Add a user holding the admin role.
    pub fn with_admin(self, user_name: &str, password: &str) -> Self {
        {
            let mut state = self.lock();
            let _ = state.insert_user(
                &NewUser::admin(user_name, password),
                vec![ROLE_USER.to_string(), ROLE_ADMIN.to_string()],
            );
        }
        self
    }

    /// Add an entry to an existing user's journal. Unknown users are ignored.
    pub fn with_entry(self, user_name: &str, title: &str, content: &str) -> Self {
        {
            let mut state = self.lock();
            let id = state.next_entry_id();
            if let Some(user) = state.users.iter_mut().find(|u| u.user_name == user_name) {
                user.entries.push(JournalEntry {
                    id,
                    title: title.to_string(),
                    content: content.to_string(),
                    date: None,
                });
            }
        }
        self
    }

    /// Number of requests served so far, across all clones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Snapshot of one user's entries, bypassing authentication.
    pub fn entries_of(&self, user_name: &str) -> Vec<JournalEntry> {
        self.lock()
            .users
            .iter()
            .find(|u| u.user_name == user_name)
            .map(|u| u.entries.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call_name: &str) -> MutexGuard<'_, MemoryState> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        debug!(call = call_name, "memory journal api call");
        self.lock()
    }
}

#[async_trait]
impl JournalApi for MemoryJournalApi {
    async fn list_entries(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<JournalEntry>, ApiError> {
        let mut state = self.record("GET /journal");
        let user = state.authenticate(credentials)?;
        if user.entries.is_empty() {
            return Err(ApiError::not_found());
        }
        Ok(user.entries.clone())
    }

    async fn get_entry(
        &self,
        credentials: &Credentials,
        id: &EntryId,
    ) -> Result<JournalEntry, ApiError> {
        let mut state = self.record("GET /journal/id/:id");
        let user = state.authenticate(credentials)?;
        user.entry_mut(id).map(|e| e.clone())
    }

    async fn create_entry(
        &self,
        credentials: &Credentials,
        draft: &EntryDraft,
    ) -> Result<(), ApiError> {
        let mut state = self.record("POST /journal");
        state.authenticate(credentials)?;
        if draft.title.is_empty() {
            return Err(ApiError::Status {
                status: 400,
                body: "title is required".to_string(),
            });
        }

        let id = state.next_entry_id();
        let user = state.authenticate(credentials)?;
        user.entries.push(JournalEntry {
            id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            date: None,
        });
        Ok(())
    }

    async fn update_entry(
        &self,
        credentials: &Credentials,
        id: &EntryId,
        draft: &EntryDraft,
    ) -> Result<(), ApiError> {
        let mut state = self.record("PUT /journal/id/:id");
        let user = state.authenticate(credentials)?;
        let entry = user.entry_mut(id)?;

        // Blank fields keep their stored value, as the backend does.
        if !draft.title.is_empty() {
            entry.title = draft.title.clone();
        }
        if !draft.content.is_empty() {
            entry.content = draft.content.clone();
        }
        Ok(())
    }

    async fn delete_entry(&self, credentials: &Credentials, id: &EntryId) -> Result<(), ApiError> {
        let mut state = self.record("DELETE /journal/id/:id");
        let user = state.authenticate(credentials)?;
        let before = user.entries.len();
        user.entries.retain(|e| &e.id != id);
        if user.entries.len() == before {
            return Err(ApiError::not_found());
        }
        Ok(())
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        let mut state = self.record("POST /public/create_user");
        state.insert_user(user, vec![ROLE_USER.to_string()])
    }

    async fn all_users(&self, credentials: &Credentials) -> Result<Vec<User>, ApiError> {
        let mut state = self.record("GET /admin/all-users");
        state.authenticate_admin(credentials)?;
        if state.users.is_empty() {
            return Err(ApiError::not_found());
        }

        Ok(state
            .users
            .iter()
            .map(|u| User {
                user_name: u.user_name.clone(),
                journal_entries: u.entries.clone(),
                roles: u.roles.clone(),
            })
            .collect())
    }

    async fn probe(&self, credentials: &Credentials, probe: Probe) -> Result<(), ApiError> {
        match probe {
            Probe::Journal => self.list_entries(credentials).await.map(drop),
            Probe::AdminUsers => self.all_users(credentials).await.map(drop),
        }
    }

    async fn create_admin(&self, credentials: &Credentials, user: &NewUser) -> Result<(), ApiError> {
        let mut state = self.record("POST /admin/create-admin-user");
        state.authenticate_admin(credentials)?;
        state.insert_user(user, vec![ROLE_USER.to_string(), ROLE_ADMIN.to_string()])
    }

    async fn health_check(&self) -> Result<String, ApiError> {
        let _state = self.record("GET /public/healthCheck");
        Ok("ok".to_string())
    }
}
