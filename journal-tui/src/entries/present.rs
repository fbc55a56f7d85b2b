//! Pure mapping from list state to what the dashboard shows.

use super::row::{EntryRowState, RowControl};
use super::{EntryList, ListContent};

pub const EMPTY_PLACEHOLDER: &str = "No journal entries yet. Add your first one!";
pub const NOT_FOUND_NOTICE: &str = "No entry found with this ID.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Static(String),
    Input {
        value: String,
        cursor: usize,
        focused: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPresentation {
    pub id: String,
    pub title: Field,
    pub content: Field,
    pub date: Option<String>,
    pub controls: Vec<RowControl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPresentation {
    Placeholder(&'static str),
    NotFound(&'static str),
    Rows(Vec<RowPresentation>),
}

pub fn present(list: &EntryList) -> ListPresentation {
    match list.content() {
        ListContent::Placeholder => ListPresentation::Placeholder(EMPTY_PLACEHOLDER),
        ListContent::NotFound => ListPresentation::NotFound(NOT_FOUND_NOTICE),
        ListContent::Rows(rows) => ListPresentation::Rows(rows.iter().map(present_row).collect()),
    }
}

pub fn present_row(row: &EntryRowState) -> RowPresentation {
    let entry = row.entry();
    let (title, content) = match row {
        EntryRowState::Viewing { entry } => (
            Field::Static(entry.title.clone()),
            Field::Static(entry.content.clone()),
        ),
        EntryRowState::Editing {
            pending_title,
            pending_content,
            focused,
            ..
        } => (
            Field::Input {
                value: pending_title.value.clone(),
                cursor: pending_title.cursor,
                focused: *focused == super::row::EditField::Title,
            },
            Field::Input {
                value: pending_content.value.clone(),
                cursor: pending_content.cursor,
                focused: *focused == super::row::EditField::Content,
            },
        ),
    };

    RowPresentation {
        id: entry.id.to_string(),
        title,
        content,
        date: entry.date.clone(),
        controls: row.controls().to_vec(),
    }
}

impl ListPresentation {
    pub fn row_count(&self) -> usize {
        match self {
            ListPresentation::Rows(rows) => rows.len(),
            _ => 0,
        }
    }
}
