use journal_api::{JournalApi, NewUser, User};
use tracing::{error, info};

use crate::error::ActionError;
use crate::session::SessionGate;

pub const NO_ENTRIES_PLACEHOLDER: &str = "No entries";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEntries {
    /// One `title: content` line per entry, in server order.
    Listed(Vec<String>),
    Empty(&'static str),
}

/// One table row of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRow {
    pub serial: usize,
    pub user_name: String,
    pub is_admin: bool,
    pub entries: AdminEntries,
}

pub fn present_admin(users: &[User]) -> Vec<AdminRow> {
    users
        .iter()
        .enumerate()
        .map(|(index, user)| AdminRow {
            serial: index + 1,
            user_name: user.user_name.clone(),
            is_admin: user.is_admin(),
            entries: if user.journal_entries.is_empty() {
                AdminEntries::Empty(NO_ENTRIES_PLACEHOLDER)
            } else {
                AdminEntries::Listed(
                    user.journal_entries
                        .iter()
                        .map(|e| format!("{}: {}", e.title, e.content))
                        .collect(),
                )
            },
        })
        .collect()
}

/// Read-only listing of every user and their entries, rebuilt on each load.
#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    users: Vec<User>,
}

impl AdminDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<AdminRow> {
        present_admin(&self.users)
    }

    pub async fn load(
        &mut self,
        gate: &mut SessionGate,
        api: &dyn JournalApi,
    ) -> Result<(), ActionError> {
        let session = gate.require_session()?;

        self.users = api.all_users(session.credentials()).await.map_err(|e| {
            error!(error = %e, "error loading admin dashboard");
            ActionError::AdminLoadFailed
        })?;
        Ok(())
    }

    /// Create a user with the admin role. The caller reloads the table.
    pub async fn create_admin(
        &mut self,
        gate: &mut SessionGate,
        api: &dyn JournalApi,
        username: &str,
        password: &str,
    ) -> Result<(), ActionError> {
        let session = gate.require_session()?;

        let (username, password) = (username.trim(), password.trim());
        if username.is_empty() || password.is_empty() {
            return Err(ActionError::Validation("Please enter username and password"));
        }

        api.create_admin(session.credentials(), &NewUser::admin(username, password))
            .await
            .map_err(|e| {
                error!(username, error = %e, "error creating admin");
                ActionError::CreateAdminFailed
            })?;

        info!(username, "admin user created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::logged_in;
    use journal_api::{EntryId, JournalEntry, MemoryJournalApi};

    #[test]
    fn rows_list_entries_or_placeholder() {
        let users = vec![
            User {
                user_name: "alice".to_string(),
                journal_entries: vec![
                    JournalEntry {
                        id: EntryId::from("e1"),
                        title: "First".to_string(),
                        content: "Hello".to_string(),
                        date: None,
                    },
                    JournalEntry {
                        id: EntryId::from("e2"),
                        title: "Second".to_string(),
                        content: "".to_string(),
                        date: None,
                    },
                ],
                roles: vec!["USER".to_string()],
            },
            User {
                user_name: "root".to_string(),
                journal_entries: vec![],
                roles: vec!["USER".to_string(), "ADMIN".to_string()],
            },
        ];

        let rows = present_admin(&users);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].serial, 1);
        assert_eq!(
            rows[0].entries,
            AdminEntries::Listed(vec!["First: Hello".to_string(), "Second: ".to_string()])
        );
        assert!(!rows[0].is_admin);
        assert_eq!(rows[1].serial, 2);
        assert_eq!(rows[1].entries, AdminEntries::Empty(NO_ENTRIES_PLACEHOLDER));
        assert!(rows[1].is_admin);
    }

    #[tokio::test]
    async fn admin_sees_every_user() {
        let api = MemoryJournalApi::new()
            .with_user("alice", "pw1")
            .with_entry("alice", "T", "C")
            .with_admin("root", "secret");
        let mut gate = logged_in(&api, "root", "secret").await;
        let mut dashboard = AdminDashboard::new();

        dashboard.load(&mut gate, &api).await.unwrap();

        let names: Vec<_> = dashboard.rows().into_iter().map(|r| r.user_name).collect();
        assert_eq!(names, vec!["alice", "root"]);
    }

    #[tokio::test]
    async fn regular_user_cannot_load_dashboard() {
        let api = MemoryJournalApi::new().with_user("alice", "pw1");
        let mut gate = logged_in(&api, "alice", "pw1").await;
        let mut dashboard = AdminDashboard::new();

        assert_eq!(
            dashboard.load(&mut gate, &api).await,
            Err(ActionError::AdminLoadFailed)
        );
    }

    #[tokio::test]
    async fn created_admin_shows_up_after_reload() {
        let api = MemoryJournalApi::new().with_admin("root", "secret");
        let mut gate = logged_in(&api, "root", "secret").await;
        let mut dashboard = AdminDashboard::new();

        dashboard
            .create_admin(&mut gate, &api, " ops ", "pw")
            .await
            .unwrap();
        dashboard.load(&mut gate, &api).await.unwrap();

        let ops = dashboard
            .rows()
            .into_iter()
            .find(|r| r.user_name == "ops")
            .expect("new admin listed");
        assert!(ops.is_admin);
    }

    #[tokio::test]
    async fn create_admin_validates_before_request() {
        let api = MemoryJournalApi::new().with_admin("root", "secret");
        let mut gate = logged_in(&api, "root", "secret").await;
        let before = api.request_count();
        let mut dashboard = AdminDashboard::new();

        assert!(matches!(
            dashboard.create_admin(&mut gate, &api, "ops", " ").await,
            Err(ActionError::Validation(_))
        ));
        assert_eq!(api.request_count(), before);
    }
}
