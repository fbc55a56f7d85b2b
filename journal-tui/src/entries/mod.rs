use journal_api::{ApiError, EntryDraft, EntryId, JournalApi, JournalEntry};
use tracing::{debug, error, info};

use crate::error::ActionError;
use crate::session::SessionGate;

mod present;
mod row;

pub use present::{present, Field, ListPresentation, RowPresentation};
#[cfg(test)]
pub use present::{EMPTY_PLACEHOLDER, NOT_FOUND_NOTICE};
pub use row::{EntryRowState, RowControl};

/// How the local list is brought back in line with the server after a
/// successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcilePolicy {
    /// Discard local state and re-fetch the whole list.
    #[default]
    RefreshOnMutate,
}

/// What the entry list region currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    Rows(Vec<EntryRowState>),
    /// The journal is empty.
    Placeholder,
    /// A lookup by id matched nothing.
    NotFound,
}

/// Keeps the rendered entry list in sync with the server and owns each
/// row's edit lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList {
    content: ListContent,
    policy: ReconcilePolicy,
}

impl Default for EntryList {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryList {
    pub fn new() -> Self {
        Self {
            content: ListContent::Placeholder,
            policy: ReconcilePolicy::default(),
        }
    }

    pub fn content(&self) -> &ListContent {
        &self.content
    }

    pub fn rows(&self) -> &[EntryRowState] {
        match &self.content {
            ListContent::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn row(&self, id: &EntryId) -> Option<&EntryRowState> {
        self.rows().iter().find(|r| r.id() == id)
    }

    pub fn row_mut(&mut self, id: &EntryId) -> Option<&mut EntryRowState> {
        match &mut self.content {
            ListContent::Rows(rows) => rows.iter_mut().find(|r| r.id() == id),
            _ => None,
        }
    }

    fn show_entries(&mut self, entries: Vec<JournalEntry>) {
        self.content = if entries.is_empty() {
            ListContent::Placeholder
        } else {
            ListContent::Rows(entries.into_iter().map(EntryRowState::viewing).collect())
        };
    }

    /// Fetch the user's whole journal and rebuild every row in server order.
    /// A failed fetch renders as an empty journal.
    pub async fn load_entries(
        &mut self,
        gate: &mut SessionGate,
        api: &dyn JournalApi,
    ) -> Result<(), ActionError> {
        let session = gate.require_session()?;

        let entries = match api.list_entries(session.credentials()).await {
            Ok(entries) => entries,
            Err(ApiError::NotFound { .. }) => vec![],
            Err(e) => {
                error!(error = %e, "failed to load entries");
                vec![]
            }
        };

        debug!(count = entries.len(), "entries loaded");
        self.show_entries(entries);
        Ok(())
    }

    async fn reconcile(
        &mut self,
        gate: &mut SessionGate,
        api: &dyn JournalApi,
    ) -> Result<(), ActionError> {
        match self.policy {
            ReconcilePolicy::RefreshOnMutate => self.load_entries(gate, api).await,
        }
    }

    pub async fn add_entry(
        &mut self,
        gate: &mut SessionGate,
        api: &dyn JournalApi,
        title: &str,
        content: &str,
    ) -> Result<(), ActionError> {
        let session = gate.require_session()?;

        let draft = EntryDraft::new(title.trim(), content.trim());
        if draft.title.is_empty() {
            return Err(ActionError::Validation("Please enter a title."));
        }

        api.create_entry(session.credentials(), &draft)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to add entry");
                ActionError::AddFailed
            })?;

        info!(title = %draft.title, "entry added");
        self.reconcile(gate, api).await
    }

    /// Delete on the server; the row stays until the refresh drops it.
    pub async fn delete_entry(
        &mut self,
        gate: &mut SessionGate,
        api: &dyn JournalApi,
        id: &EntryId,
    ) -> Result<(), ActionError> {
        let session = gate.require_session()?;

        api.delete_entry(session.credentials(), id)
            .await
            .map_err(|e| {
                error!(%id, error = %e, "delete failed");
                ActionError::DeleteFailed
            })?;

        info!(%id, "entry deleted");
        self.reconcile(gate, api).await
    }

    /// Replace the whole list with the single entry matching `raw_id`.
    /// Call [`EntryList::clear_search`] to get the full list back.
    pub async fn search_by_id(
        &mut self,
        gate: &mut SessionGate,
        api: &dyn JournalApi,
        raw_id: &str,
    ) -> Result<(), ActionError> {
        let session = gate.require_session()?;

        let raw_id = raw_id.trim();
        if raw_id.is_empty() {
            return Err(ActionError::Validation("Please enter an ID to search."));
        }

        match api.get_entry(session.credentials(), &EntryId::from(raw_id)).await {
            Ok(entry) => {
                self.content = ListContent::Rows(vec![EntryRowState::viewing(entry)]);
                Ok(())
            }
            Err(ApiError::NotFound { .. }) => {
                self.content = ListContent::NotFound;
                Err(ActionError::EntryNotFound)
            }
            Err(e) => {
                error!(id = raw_id, error = %e, "entry lookup failed");
                Err(ActionError::FetchFailed)
            }
        }
    }

    pub async fn clear_search(
        &mut self,
        gate: &mut SessionGate,
        api: &dyn JournalApi,
    ) -> Result<(), ActionError> {
        self.load_entries(gate, api).await
    }

    /// Returns false if no such row is shown or it is already being edited.
    pub fn start_edit(&mut self, id: &EntryId) -> bool {
        self.row_mut(id).is_some_and(EntryRowState::start_edit)
    }

    /// Returns false if no such row is shown or it is not being edited.
    pub fn cancel_edit(&mut self, id: &EntryId) -> bool {
        self.row_mut(id).is_some_and(EntryRowState::cancel_edit)
    }

    /// Send the row's inputs to the server. On failure the row stays in
    /// edit mode with whatever was typed.
    pub async fn save_edit(
        &mut self,
        gate: &mut SessionGate,
        api: &dyn JournalApi,
        id: &EntryId,
    ) -> Result<(), ActionError> {
        let session = gate.require_session()?;

        let draft = self
            .row(id)
            .and_then(EntryRowState::pending_draft)
            .ok_or(ActionError::NotEditing)?;

        api.update_entry(session.credentials(), id, &draft)
            .await
            .map_err(|e| {
                error!(%id, error = %e, "update failed");
                ActionError::UpdateFailed
            })?;

        info!(%id, "entry updated");
        self.reconcile(gate, api).await
    }
}
