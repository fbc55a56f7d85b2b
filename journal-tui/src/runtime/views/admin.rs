use super::*;

pub(super) fn handle_admin_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 'l') {
        app.logout();
        return;
    }
    if is_ctrl(&key, 'r') {
        enqueue_action(action_tx, Action::LoadAdmin);
        return;
    }
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.admin_form.next_field();
        }
        KeyCode::Enter => enqueue_action(action_tx, Action::CreateAdmin),
        _ => handle_text_key(key, app),
    }
}
