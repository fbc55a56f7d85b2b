use crate::text_input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsField {
    #[default]
    Username,
    Password,
}

/// Username/password pair used by the login, register and admin-creation forms.
#[derive(Debug, Clone, Default)]
pub struct CredentialsForm {
    pub username: TextInput,
    pub password: TextInput,
    pub focused: CredentialsField,
}

impl CredentialsForm {
    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            CredentialsField::Username => CredentialsField::Password,
            CredentialsField::Password => CredentialsField::Username,
        };
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused {
            CredentialsField::Username => &mut self.username,
            CredentialsField::Password => &mut self.password,
        }
    }

    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
        self.focused = CredentialsField::Username;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryFormField {
    #[default]
    Title,
    Content,
}

/// The "new entry" inputs on the dashboard.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub title: TextInput,
    pub content: TextInput,
    pub focused: EntryFormField,
}

impl EntryForm {
    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused {
            EntryFormField::Title => &mut self.title,
            EntryFormField::Content => &mut self.content,
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
        self.focused = EntryFormField::Title;
    }
}

/// Which dashboard region receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardFocus {
    #[default]
    NewEntry,
    Search,
    Entries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message; blocks other input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}
