use super::*;
use crate::app::DashboardFocus;

pub(super) fn handle_dashboard_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 'l') {
        app.logout();
        return;
    }
    match key.code {
        KeyCode::Tab => {
            if app.dashboard_focus == DashboardFocus::Entries && app.focused_row_is_editing() {
                app.toggle_focused_edit_field();
            } else {
                app.dashboard_focus_next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.dashboard_focus_previous();
            return;
        }
        _ => {}
    }

    match app.dashboard_focus {
        DashboardFocus::NewEntry => match key.code {
            KeyCode::Enter => enqueue_action(action_tx, Action::AddEntry),
            _ => handle_text_key(key, app),
        },
        DashboardFocus::Search => match key.code {
            KeyCode::Enter => enqueue_action(action_tx, Action::Search),
            KeyCode::Esc => enqueue_action(action_tx, Action::ClearSearch),
            _ => handle_text_key(key, app),
        },
        DashboardFocus::Entries if app.focused_row_is_editing() => {
            handle_editing_row_key(key, app, action_tx)
        }
        DashboardFocus::Entries => handle_entries_key(key, app, action_tx),
    }
}

fn handle_editing_row_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 's') || key.code == KeyCode::Enter {
        if let Some(id) = app.focused_entry_id() {
            enqueue_action(action_tx, Action::SaveEdit(id));
        }
        return;
    }
    if is_ctrl(&key, 'd') {
        if let Some(id) = app.focused_entry_id() {
            enqueue_action(action_tx, Action::DeleteEntry(id));
        }
        return;
    }
    match key.code {
        KeyCode::Esc => app.cancel_edit_focused(),
        KeyCode::Up => app.row_focus_up(),
        KeyCode::Down => app.row_focus_down(),
        _ => handle_text_key(key, app),
    }
}

fn handle_entries_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.row_focus_up(),
        KeyCode::Down | KeyCode::Char('j') => app.row_focus_down(),
        KeyCode::Char('e') | KeyCode::Enter => app.start_edit_focused(),
        KeyCode::Char('d') => {
            if let Some(id) = app.focused_entry_id() {
                enqueue_action(action_tx, Action::DeleteEntry(id));
            }
        }
        KeyCode::Char('/') => app.focus_search(),
        KeyCode::Char('c') => enqueue_action(action_tx, Action::ClearSearch),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::LoadEntries),
        KeyCode::Char('L') => app.logout(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::logged_in;
    use crossterm::event::KeyModifiers;
    use journal_api::MemoryJournalApi;

    use super::super::super::action_queue::{channel, ActionRx};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn dashboard_app() -> App {
        let api = MemoryJournalApi::new()
            .with_user("alice", "pw1")
            .with_entry("alice", "one", "1")
            .with_entry("alice", "two", "2");
        let mut app = App::new();
        app.gate = logged_in(&api, "alice", "pw1").await;
        app.entries.load_entries(&mut app.gate, &api).await.unwrap();
        app.dashboard_focus = DashboardFocus::Entries;
        app
    }

    fn drain(rx: &mut ActionRx) -> Vec<Action> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn edit_save_sends_focused_row_id() {
        let mut app = dashboard_app().await;
        let (tx, mut rx) = channel();

        handle_dashboard_key(press(KeyCode::Char('j')), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Char('e')), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Char('!')), &mut app, &tx);
        handle_dashboard_key(ctrl('s'), &mut app, &tx);

        let id = app.entries.rows()[1].id().clone();
        assert_eq!(drain(&mut rx), vec![Action::SaveEdit(id)]);
        assert_eq!(
            app.entries.rows()[1].pending_draft().map(|d| d.title),
            Some("two!".to_string())
        );
    }

    #[tokio::test]
    async fn letters_are_typed_not_commands_while_editing() {
        let mut app = dashboard_app().await;
        let (tx, mut rx) = channel();

        handle_dashboard_key(press(KeyCode::Char('e')), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Char('d')), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Char('r')), &mut app, &tx);

        assert!(drain(&mut rx).is_empty());
        assert_eq!(
            app.entries.rows()[0].pending_draft().map(|d| d.title),
            Some("onedr".to_string())
        );
    }

    #[tokio::test]
    async fn esc_cancels_edit_without_queueing() {
        let mut app = dashboard_app().await;
        let (tx, mut rx) = channel();

        handle_dashboard_key(press(KeyCode::Char('e')), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Backspace), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Esc), &mut app, &tx);

        assert!(drain(&mut rx).is_empty());
        assert!(!app.entries.rows()[0].is_editing());
        assert_eq!(app.entries.rows()[0].entry().title, "one");
    }

    #[tokio::test]
    async fn viewing_row_keys_queue_delete_and_reload() {
        let mut app = dashboard_app().await;
        let (tx, mut rx) = channel();
        let id = app.entries.rows()[0].id().clone();

        handle_dashboard_key(press(KeyCode::Char('d')), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Char('r')), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Char('c')), &mut app, &tx);

        assert_eq!(
            drain(&mut rx),
            vec![
                Action::DeleteEntry(id),
                Action::LoadEntries,
                Action::ClearSearch
            ]
        );
    }

    #[tokio::test]
    async fn slash_focuses_search_and_enter_searches() {
        let mut app = dashboard_app().await;
        let (tx, mut rx) = channel();

        handle_dashboard_key(press(KeyCode::Char('/')), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Char('4')), &mut app, &tx);
        handle_dashboard_key(press(KeyCode::Enter), &mut app, &tx);

        assert_eq!(app.dashboard_focus, DashboardFocus::Search);
        assert_eq!(app.search_input.value, "4");
        assert_eq!(drain(&mut rx), vec![Action::Search]);
    }

    #[tokio::test]
    async fn ctrl_l_logs_out() {
        let mut app = dashboard_app().await;
        let (tx, _rx) = channel();

        handle_dashboard_key(ctrl('l'), &mut app, &tx);

        assert_eq!(app.surface(), Surface::Login);
        assert!(app.gate.session().is_none());
    }
}
