use journal_api::{EntryDraft, EntryId, JournalEntry};

use crate::text_input::TextInput;

/// Controls offered on a rendered row, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowControl {
    Delete,
    Edit,
    Save,
    Cancel,
}

const VIEWING_CONTROLS: &[RowControl] = &[RowControl::Delete, RowControl::Edit];
const EDITING_CONTROLS: &[RowControl] = &[RowControl::Delete, RowControl::Save, RowControl::Cancel];

/// Which inline input receives typing while a row is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Title,
    Content,
}

/// Per-row view/edit state. Rows transition independently of each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryRowState {
    Viewing {
        entry: JournalEntry,
    },
    Editing {
        entry: JournalEntry,
        pending_title: TextInput,
        pending_content: TextInput,
        /// Display values captured on entering edit mode; cancel restores these.
        original_title: String,
        original_content: String,
        focused: EditField,
    },
}

impl EntryRowState {
    pub fn viewing(entry: JournalEntry) -> Self {
        Self::Viewing { entry }
    }

    pub fn entry(&self) -> &JournalEntry {
        match self {
            Self::Viewing { entry } | Self::Editing { entry, .. } => entry,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.entry().id
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    pub fn controls(&self) -> &'static [RowControl] {
        match self {
            Self::Viewing { .. } => VIEWING_CONTROLS,
            Self::Editing { .. } => EDITING_CONTROLS,
        }
    }

    /// Swap the static display for inputs seeded with the displayed values.
    /// Returns false if the row was already being edited.
    pub fn start_edit(&mut self) -> bool {
        let Self::Viewing { entry } = self else {
            return false;
        };

        let entry = entry.clone();
        *self = Self::Editing {
            pending_title: TextInput::from_str(&entry.title),
            pending_content: TextInput::from_str(&entry.content),
            original_title: entry.title.clone(),
            original_content: entry.content.clone(),
            focused: EditField::Title,
            entry,
        };
        true
    }

    /// Drop the inputs and show the captured originals again.
    /// Returns false if the row was not being edited.
    pub fn cancel_edit(&mut self) -> bool {
        let Self::Editing {
            entry,
            original_title,
            original_content,
            ..
        } = self
        else {
            return false;
        };

        let restored = JournalEntry {
            title: std::mem::take(original_title),
            content: std::mem::take(original_content),
            ..entry.clone()
        };
        *self = Self::Viewing { entry: restored };
        true
    }

    /// The trimmed values currently typed into the inputs.
    pub fn pending_draft(&self) -> Option<EntryDraft> {
        match self {
            Self::Editing {
                pending_title,
                pending_content,
                ..
            } => Some(EntryDraft::new(
                pending_title.trimmed(),
                pending_content.trimmed(),
            )),
            Self::Viewing { .. } => None,
        }
    }

    /// The input that currently receives typing, if editing.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            Self::Editing {
                pending_title,
                pending_content,
                focused,
                ..
            } => Some(match focused {
                EditField::Title => pending_title,
                EditField::Content => pending_content,
            }),
            Self::Viewing { .. } => None,
        }
    }

    pub fn toggle_edit_field(&mut self) {
        if let Self::Editing { focused, .. } = self {
            *focused = match focused {
                EditField::Title => EditField::Content,
                EditField::Content => EditField::Title,
            };
        }
    }
}
