use journal_api::EntryId;
use tracing::debug;

use crate::admin::AdminDashboard;
use crate::entries::EntryList;
use crate::error::ActionError;
use crate::session::{SessionGate, Surface};
use crate::text_input::TextInput;

mod navigation;
mod state;
pub use state::{
    CredentialsField, CredentialsForm, DashboardFocus, EntryForm, EntryFormField, Notice,
    NoticeKind,
};

#[derive(Clone)]
pub struct App {
    pub running: bool,
    /// Set on the copy drawn while a request is in flight.
    pub busy: bool,
    pub gate: SessionGate,

    // User dashboard
    pub entries: EntryList,
    pub entry_form: EntryForm,
    pub search_input: TextInput,
    pub dashboard_focus: DashboardFocus,
    pub focused_row: usize,

    // Admin dashboard
    pub admin: AdminDashboard,
    pub admin_form: CredentialsForm,

    // Auth screens
    pub login_form: CredentialsForm,
    pub register_form: CredentialsForm,

    pub notice: Option<Notice>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            busy: false,
            gate: SessionGate::new(),
            entries: EntryList::new(),
            entry_form: EntryForm::default(),
            search_input: TextInput::new(),
            dashboard_focus: DashboardFocus::default(),
            focused_row: 0,
            admin: AdminDashboard::new(),
            admin_form: CredentialsForm::default(),
            login_form: CredentialsForm::default(),
            register_form: CredentialsForm::default(),
            notice: None,
        }
    }

    pub fn surface(&self) -> Surface {
        self.gate.surface()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn notify_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Info,
            text: text.into(),
        });
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Surface an action's failure to the user, if it has anything to say.
    pub fn report(&mut self, result: Result<(), ActionError>) {
        if let Err(e) = result {
            debug!(error = ?e, "action failed");
            if !e.is_silent() {
                self.notify_error(e.to_string());
            }
        }
    }

    /// Drop the session and every piece of per-user state.
    pub fn logout(&mut self) {
        self.gate.logout();
        self.entries = EntryList::new();
        self.admin = AdminDashboard::new();
        self.entry_form.clear();
        self.admin_form.clear();
        self.search_input.clear();
        self.dashboard_focus = DashboardFocus::default();
        self.focused_row = 0;
    }

    pub fn focused_entry_id(&self) -> Option<EntryId> {
        self.entries
            .rows()
            .get(self.focused_row)
            .map(|row| row.id().clone())
    }

    pub fn focused_row_is_editing(&self) -> bool {
        self.entries
            .rows()
            .get(self.focused_row)
            .is_some_and(|row| row.is_editing())
    }

    /// Keep the row cursor inside the list after it was rebuilt.
    pub fn clamp_row_focus(&mut self) {
        let len = self.entries.rows().len();
        if self.focused_row >= len {
            self.focused_row = len.saturating_sub(1);
        }
    }

    /// The text input that currently receives typed characters.
    pub fn active_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.gate.surface() {
            Surface::Login => Some(self.login_form.focused_input_mut()),
            Surface::Register => Some(self.register_form.focused_input_mut()),
            Surface::AdminDashboard => Some(self.admin_form.focused_input_mut()),
            Surface::Dashboard => match self.dashboard_focus {
                DashboardFocus::NewEntry => Some(self.entry_form.focused_input_mut()),
                DashboardFocus::Search => Some(&mut self.search_input),
                DashboardFocus::Entries => {
                    let id = self.focused_entry_id()?;
                    self.entries.row_mut(&id)?.focused_input_mut()
                }
            },
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.active_input_mut() {
            input.insert(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.backspace();
        }
    }

    pub fn input_move_left(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_left();
        }
    }

    pub fn input_move_right(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_right();
        }
    }

    pub fn start_edit_focused(&mut self) {
        if let Some(id) = self.focused_entry_id() {
            self.entries.start_edit(&id);
        }
    }

    pub fn cancel_edit_focused(&mut self) {
        if let Some(id) = self.focused_entry_id() {
            self.entries.cancel_edit(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::logged_in;
    use journal_api::MemoryJournalApi;

    #[tokio::test]
    async fn typing_goes_to_the_focused_row_while_editing() {
        let api = MemoryJournalApi::new()
            .with_user("alice", "pw1")
            .with_entry("alice", "one", "1")
            .with_entry("alice", "two", "2");
        let mut app = App::new();
        app.gate = logged_in(&api, "alice", "pw1").await;
        app.entries.load_entries(&mut app.gate, &api).await.unwrap();
        app.dashboard_focus = DashboardFocus::Entries;
        app.focused_row = 1;

        app.start_edit_focused();
        app.input_char('!');

        let draft = app.entries.rows()[1].pending_draft().unwrap();
        assert_eq!(draft.title, "two!");
        assert!(!app.entries.rows()[0].is_editing());
    }

    #[tokio::test]
    async fn typing_on_viewing_row_is_ignored() {
        let api = MemoryJournalApi::new()
            .with_user("alice", "pw1")
            .with_entry("alice", "one", "1");
        let mut app = App::new();
        app.gate = logged_in(&api, "alice", "pw1").await;
        app.entries.load_entries(&mut app.gate, &api).await.unwrap();
        app.dashboard_focus = DashboardFocus::Entries;

        app.input_char('x');

        assert!(app.active_input_mut().is_none());
        assert_eq!(app.entries.rows()[0].entry().title, "one");
    }

    #[test]
    fn silent_failures_raise_no_notice() {
        let mut app = App::new();

        app.report(Err(ActionError::NoSession));
        assert!(app.notice.is_none());

        app.report(Err(ActionError::AddFailed));
        assert_eq!(
            app.notice,
            Some(Notice {
                kind: NoticeKind::Error,
                text: "Failed to add entry".to_string()
            })
        );
    }

    #[tokio::test]
    async fn logout_resets_per_user_state() {
        let api = MemoryJournalApi::new()
            .with_user("alice", "pw1")
            .with_entry("alice", "one", "1");
        let mut app = App::new();
        app.gate = logged_in(&api, "alice", "pw1").await;
        app.entries.load_entries(&mut app.gate, &api).await.unwrap();
        app.search_input = TextInput::from_str("abc");

        app.logout();

        assert_eq!(app.surface(), Surface::Login);
        assert!(app.entries.rows().is_empty());
        assert!(app.search_input.value.is_empty());
    }
}
