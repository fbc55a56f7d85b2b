use super::*;

impl App {
    /// Cycle dashboard focus forward: title, content, search, entries.
    pub fn dashboard_focus_next(&mut self) {
        match self.dashboard_focus {
            DashboardFocus::NewEntry => match self.entry_form.focused {
                EntryFormField::Title => self.entry_form.focused = EntryFormField::Content,
                EntryFormField::Content => self.dashboard_focus = DashboardFocus::Search,
            },
            DashboardFocus::Search => {
                self.dashboard_focus = DashboardFocus::Entries;
                self.clamp_row_focus();
            }
            DashboardFocus::Entries => {
                self.dashboard_focus = DashboardFocus::NewEntry;
                self.entry_form.focused = EntryFormField::Title;
            }
        }
    }

    pub fn dashboard_focus_previous(&mut self) {
        match self.dashboard_focus {
            DashboardFocus::NewEntry => match self.entry_form.focused {
                EntryFormField::Content => self.entry_form.focused = EntryFormField::Title,
                EntryFormField::Title => {
                    self.dashboard_focus = DashboardFocus::Entries;
                    self.clamp_row_focus();
                }
            },
            DashboardFocus::Search => {
                self.dashboard_focus = DashboardFocus::NewEntry;
                self.entry_form.focused = EntryFormField::Content;
            }
            DashboardFocus::Entries => self.dashboard_focus = DashboardFocus::Search,
        }
    }

    pub fn focus_search(&mut self) {
        self.dashboard_focus = DashboardFocus::Search;
    }

    /// Move the row cursor up (vim-style k)
    pub fn row_focus_up(&mut self) {
        self.focused_row = self.focused_row.saturating_sub(1);
    }

    /// Move the row cursor down (vim-style j)
    pub fn row_focus_down(&mut self) {
        if self.focused_row + 1 < self.entries.rows().len() {
            self.focused_row += 1;
        }
    }

    /// Switch the editing row between its title and content inputs.
    pub fn toggle_focused_edit_field(&mut self) {
        if let Some(id) = self.focused_entry_id() {
            if let Some(row) = self.entries.row_mut(&id) {
                row.toggle_edit_field();
            }
        }
    }

    pub fn open_register(&mut self) {
        self.login_form.clear();
        self.gate.show_register();
    }

    pub fn open_login(&mut self) {
        self.register_form.clear();
        self.gate.show_login();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_walks_every_dashboard_region_and_wraps() {
        let mut app = App::new();

        app.dashboard_focus_next();
        assert_eq!(app.entry_form.focused, EntryFormField::Content);
        app.dashboard_focus_next();
        assert_eq!(app.dashboard_focus, DashboardFocus::Search);
        app.dashboard_focus_next();
        assert_eq!(app.dashboard_focus, DashboardFocus::Entries);
        app.dashboard_focus_next();
        assert_eq!(app.dashboard_focus, DashboardFocus::NewEntry);
        assert_eq!(app.entry_form.focused, EntryFormField::Title);
    }

    #[test]
    fn back_tab_reverses_tab() {
        let mut app = App::new();
        app.dashboard_focus = DashboardFocus::Search;

        app.dashboard_focus_previous();
        assert_eq!(app.dashboard_focus, DashboardFocus::NewEntry);
        assert_eq!(app.entry_form.focused, EntryFormField::Content);

        app.dashboard_focus_previous();
        app.dashboard_focus_previous();
        assert_eq!(app.dashboard_focus, DashboardFocus::Entries);
    }

    #[test]
    fn row_cursor_stays_in_bounds_on_empty_list() {
        let mut app = App::new();
        app.row_focus_down();
        app.row_focus_up();
        assert_eq!(app.focused_row, 0);
    }

    #[test]
    fn switching_auth_screens_clears_the_form_left_behind() {
        let mut app = App::new();
        app.login_form.username = TextInput::from_str("alice");

        app.open_register();
        assert_eq!(app.surface(), Surface::Register);
        assert!(app.login_form.username.value.is_empty());

        app.register_form.password = TextInput::from_str("secret");
        app.open_login();
        assert_eq!(app.surface(), Surface::Login);
        assert!(app.register_form.password.value.is_empty());
    }
}
