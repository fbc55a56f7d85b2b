use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use journal_api::JournalApi;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time;

use super::action_queue::{channel, Action};
use super::actions::run_action;
use super::views::{handle_notice_key, handle_view_key};

const TICK: Duration = Duration::from_millis(100);

type InputRx = UnboundedReceiver<Event>;

/// How a queued action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Completion {
    Finished,
    /// Esc while the request was in flight; the request future was dropped.
    Cancelled,
    /// Ctrl+Q while the request was in flight.
    Quit,
}

/// crossterm's `read` blocks, so it gets its own thread feeding the loop.
fn spawn_input_reader() -> InputRx {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while let Ok(event) = event::read() {
            if tx.send(event).is_err() {
                break;
            }
        }
    });
    rx
}

fn as_key_press(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &dyn JournalApi,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let mut input_rx = spawn_input_reader();
    let mut tick = time::interval(TICK);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        tokio::select! {
            Some(event) = input_rx.recv() => {
                if let Some(key) = as_key_press(event) {
                    if app.notice.is_some() {
                        handle_notice_key(key, app);
                    } else {
                        handle_view_key(key, app, &action_tx);
                    }
                }
            }
            _ = tick.tick() => {}
        }

        while let Ok(action) = action_rx.try_recv() {
            let completion = run_while_responsive(action, app, api, &mut input_rx, |pending| {
                terminal.draw(|f| ui::render(f, pending))?;
                Ok(())
            })
            .await?;

            match completion {
                Completion::Finished => {}
                Completion::Cancelled => app.notify_info("Request cancelled."),
                Completion::Quit => app.quit(),
            }
            if !app.running {
                break;
            }
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}

/// Run one action while still redrawing and reading keys.
///
/// The action owns `app` until it resolves, so frames are drawn from a copy
/// taken before it started, marked busy. Only Ctrl+Q and Esc are honored
/// meanwhile; dropping the action future leaves `app` as it was before the
/// unfinished request.
pub(super) async fn run_while_responsive(
    action: Action,
    app: &mut App,
    api: &dyn JournalApi,
    input_rx: &mut InputRx,
    mut redraw: impl FnMut(&App) -> Result<()>,
) -> Result<Completion> {
    let mut pending = app.clone();
    pending.busy = true;

    let mut tick = time::interval(TICK);
    let work = run_action(action, app, api);
    tokio::pin!(work);

    loop {
        tokio::select! {
            biased;
            () = &mut work => return Ok(Completion::Finished),
            Some(event) = input_rx.recv() => {
                let Some(key) = as_key_press(event) else {
                    continue;
                };
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
                    return Ok(Completion::Quit);
                }
                if key.code == KeyCode::Esc {
                    return Ok(Completion::Cancelled);
                }
            }
            _ = tick.tick() => redraw(&pending)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Surface;
    use crate::text_input::TextInput;
    use async_trait::async_trait;
    use journal_api::{
        ApiError, Credentials, EntryDraft, EntryId, JournalEntry, MemoryJournalApi, NewUser,
        Probe, User,
    };
    use std::future::pending;

    /// Accepts every call and never answers.
    struct SilentBackend;

    #[async_trait]
    impl JournalApi for SilentBackend {
        async fn list_entries(&self, _: &Credentials) -> Result<Vec<JournalEntry>, ApiError> {
            pending().await
        }
        async fn get_entry(&self, _: &Credentials, _: &EntryId) -> Result<JournalEntry, ApiError> {
            pending().await
        }
        async fn create_entry(&self, _: &Credentials, _: &EntryDraft) -> Result<(), ApiError> {
            pending().await
        }
        async fn update_entry(
            &self,
            _: &Credentials,
            _: &EntryId,
            _: &EntryDraft,
        ) -> Result<(), ApiError> {
            pending().await
        }
        async fn delete_entry(&self, _: &Credentials, _: &EntryId) -> Result<(), ApiError> {
            pending().await
        }
        async fn create_user(&self, _: &NewUser) -> Result<(), ApiError> {
            pending().await
        }
        async fn all_users(&self, _: &Credentials) -> Result<Vec<User>, ApiError> {
            pending().await
        }
        async fn probe(&self, _: &Credentials, _: Probe) -> Result<(), ApiError> {
            pending().await
        }
        async fn create_admin(&self, _: &Credentials, _: &NewUser) -> Result<(), ApiError> {
            pending().await
        }
        async fn health_check(&self) -> Result<String, ApiError> {
            pending().await
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn login_app() -> App {
        let mut app = App::new();
        app.login_form.username = TextInput::from_str("alice");
        app.login_form.password = TextInput::from_str("pw1");
        app
    }

    #[tokio::test]
    async fn ctrl_q_quits_while_backend_never_answers() {
        let mut app = login_app();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(key(KeyCode::Char('q'), KeyModifiers::CONTROL)).unwrap();

        let completion = time::timeout(
            Duration::from_secs(2),
            run_while_responsive(Action::Login, &mut app, &SilentBackend, &mut rx, |_| Ok(())),
        )
        .await
        .expect("loop stopped handling keys")
        .unwrap();

        assert_eq!(completion, Completion::Quit);
        assert!(app.gate.session().is_none());
    }

    #[tokio::test]
    async fn esc_cancels_after_busy_frames_were_drawn() {
        let mut app = login_app();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(250)).await;
            let _ = tx.send(key(KeyCode::Esc, KeyModifiers::NONE));
        });

        let mut frames = Vec::new();
        let completion = time::timeout(
            Duration::from_secs(2),
            run_while_responsive(Action::Login, &mut app, &SilentBackend, &mut rx, |drawn| {
                frames.push((drawn.busy, drawn.login_form.username.value.clone()));
                Ok(())
            }),
        )
        .await
        .expect("loop stopped handling keys")
        .unwrap();

        assert_eq!(completion, Completion::Cancelled);
        assert!(frames.len() >= 2);
        assert!(frames.iter().all(|(busy, user)| *busy && user == "alice"));
        assert!(!app.busy);
        assert_eq!(app.surface(), Surface::Login);
        assert_eq!(app.login_form.username.value, "alice");
    }

    #[tokio::test]
    async fn answered_request_finishes_and_applies_to_app() {
        let api = MemoryJournalApi::new().with_user("alice", "pw1");
        let mut app = login_app();
        let (_tx, mut rx) = mpsc::unbounded_channel();

        let completion =
            run_while_responsive(Action::Login, &mut app, &api, &mut rx, |_| Ok(()))
                .await
                .unwrap();

        assert_eq!(completion, Completion::Finished);
        assert_eq!(app.surface(), Surface::Dashboard);
    }
}
