use crate::app::App;
use crate::session::Surface;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod admin;
mod auth;
mod dashboard;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Typing and cursor keys shared by every text input.
fn handle_text_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.input_char(c),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Left => app.input_move_left(),
        KeyCode::Right => app.input_move_right(),
        KeyCode::Home => {
            if let Some(input) = app.active_input_mut() {
                input.home();
            }
        }
        KeyCode::End => {
            if let Some(input) = app.active_input_mut() {
                input.end();
            }
        }
        _ => {}
    }
}

pub(super) fn handle_notice_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => app.dismiss_notice(),
        _ if is_ctrl(&key, 'q') => app.quit(),
        _ => {}
    }
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 'q') {
        app.quit();
        return;
    }

    match app.surface() {
        Surface::Login => auth::handle_login_key(key, app, action_tx),
        Surface::Register => auth::handle_register_key(key, app, action_tx),
        Surface::Dashboard => dashboard::handle_dashboard_key(key, app, action_tx),
        Surface::AdminDashboard => admin::handle_admin_key(key, app, action_tx),
    }
}
