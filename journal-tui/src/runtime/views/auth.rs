use super::*;

pub(super) fn handle_login_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 'r') {
        app.open_register();
        return;
    }
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_form.next_field();
        }
        KeyCode::Enter => enqueue_action(action_tx, Action::Login),
        _ => handle_text_key(key, app),
    }
}

pub(super) fn handle_register_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.register_form.next_field();
        }
        KeyCode::Enter => enqueue_action(action_tx, Action::Register),
        KeyCode::Esc => app.open_login(),
        _ => handle_text_key(key, app),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CredentialsField;
    use crossterm::event::KeyModifiers;

    use super::super::super::action_queue::channel;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_fills_focused_field_and_enter_queues_login() {
        let mut app = App::new();
        let (tx, mut rx) = channel();

        for c in "bob".chars() {
            handle_login_key(press(KeyCode::Char(c)), &mut app, &tx);
        }
        handle_login_key(press(KeyCode::Tab), &mut app, &tx);
        handle_login_key(press(KeyCode::Char('x')), &mut app, &tx);
        handle_login_key(press(KeyCode::Enter), &mut app, &tx);

        assert_eq!(app.login_form.username.value, "bob");
        assert_eq!(app.login_form.password.value, "x");
        assert_eq!(app.login_form.focused, CredentialsField::Password);
        assert_eq!(rx.try_recv().ok(), Some(Action::Login));
    }

    #[test]
    fn ctrl_r_opens_register_and_esc_returns() {
        let mut app = App::new();
        let (tx, mut rx) = channel();

        handle_login_key(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        assert_eq!(app.surface(), Surface::Register);
        assert!(app.login_form.username.value.is_empty());

        handle_register_key(press(KeyCode::Esc), &mut app, &tx);
        assert_eq!(app.surface(), Surface::Login);
        assert!(rx.try_recv().is_err());
    }
}
