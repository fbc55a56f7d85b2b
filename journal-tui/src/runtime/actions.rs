use crate::app::{App, DashboardFocus};
use crate::session::Role;
use journal_api::{EntryId, JournalApi};
use tracing::debug;

use super::action_queue::Action;

pub(super) async fn run_action(action: Action, app: &mut App, api: &dyn JournalApi) {
    debug!(?action, "running action");
    match action {
        Action::Login => handle_login(app, api).await,
        Action::Register => handle_register(app, api).await,
        Action::LoadEntries => handle_load_entries(app, api).await,
        Action::AddEntry => handle_add_entry(app, api).await,
        Action::DeleteEntry(id) => handle_delete_entry(app, api, &id).await,
        Action::SaveEdit(id) => handle_save_edit(app, api, &id).await,
        Action::Search => handle_search(app, api).await,
        Action::ClearSearch => handle_clear_search(app, api).await,
        Action::LoadAdmin => handle_load_admin(app, api).await,
        Action::CreateAdmin => handle_create_admin(app, api).await,
    }
}

async fn handle_login(app: &mut App, api: &dyn JournalApi) {
    let username = app.login_form.username.value.clone();
    let password = app.login_form.password.value.clone();

    match app.gate.login(api, &username, &password).await {
        Ok(role) => {
            app.login_form.clear();
            match role {
                Role::Admin => handle_load_admin(app, api).await,
                Role::User => {
                    app.dashboard_focus = DashboardFocus::NewEntry;
                    app.focused_row = 0;
                    handle_load_entries(app, api).await;
                }
            }
        }
        Err(e) => app.report(Err(e)),
    }
}

async fn handle_register(app: &mut App, api: &dyn JournalApi) {
    let username = app.register_form.username.value.clone();
    let password = app.register_form.password.value.clone();

    match app.gate.register(api, &username, &password).await {
        Ok(()) => {
            app.register_form.clear();
            app.notify_info("User registered! Login now.");
        }
        Err(e) => app.report(Err(e)),
    }
}

async fn handle_load_entries(app: &mut App, api: &dyn JournalApi) {
    let result = app.entries.load_entries(&mut app.gate, api).await;
    app.clamp_row_focus();
    app.report(result);
}

async fn handle_add_entry(app: &mut App, api: &dyn JournalApi) {
    let title = app.entry_form.title.value.clone();
    let content = app.entry_form.content.value.clone();

    let result = app
        .entries
        .add_entry(&mut app.gate, api, &title, &content)
        .await;
    if result.is_ok() {
        app.entry_form.clear();
    }
    app.clamp_row_focus();
    app.report(result);
}

async fn handle_delete_entry(app: &mut App, api: &dyn JournalApi, id: &EntryId) {
    let result = app.entries.delete_entry(&mut app.gate, api, id).await;
    app.clamp_row_focus();
    app.report(result);
}

async fn handle_save_edit(app: &mut App, api: &dyn JournalApi, id: &EntryId) {
    let result = app.entries.save_edit(&mut app.gate, api, id).await;
    app.clamp_row_focus();
    app.report(result);
}

async fn handle_search(app: &mut App, api: &dyn JournalApi) {
    let raw_id = app.search_input.value.clone();
    let result = app.entries.search_by_id(&mut app.gate, api, &raw_id).await;
    app.focused_row = 0;
    app.report(result);
}

async fn handle_clear_search(app: &mut App, api: &dyn JournalApi) {
    app.search_input.clear();
    let result = app.entries.clear_search(&mut app.gate, api).await;
    app.clamp_row_focus();
    app.report(result);
}

async fn handle_load_admin(app: &mut App, api: &dyn JournalApi) {
    let result = app.admin.load(&mut app.gate, api).await;
    app.report(result);
}

async fn handle_create_admin(app: &mut App, api: &dyn JournalApi) {
    let username = app.admin_form.username.value.clone();
    let password = app.admin_form.password.value.clone();

    match app
        .admin
        .create_admin(&mut app.gate, api, &username, &password)
        .await
    {
        Ok(()) => {
            app.admin_form.clear();
            app.notify_info("Admin created successfully!");
            handle_load_admin(app, api).await;
        }
        Err(e) => app.report(Err(e)),
    }
}
