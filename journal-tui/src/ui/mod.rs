use crate::app::{App, Notice, NoticeKind};
use crate::session::{Role, Surface};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

mod admin_view;
mod auth_view;
mod dashboard_view;
pub(super) mod utils;
pub(super) mod widgets;

pub fn render(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, root[0], app);

    let body = root[1];
    match app.surface() {
        Surface::Login => auth_view::render_login(frame, app, body),
        Surface::Register => auth_view::render_register(frame, app, body),
        Surface::Dashboard => dashboard_view::render_dashboard(frame, app, body),
        Surface::AdminDashboard => admin_view::render_admin_dashboard(frame, app, body),
    }

    frame.render_widget(Paragraph::new(key_hints(app)), root[2]);

    // Notice renders on top of any view
    if let Some(notice) = &app.notice {
        render_notice(frame, notice);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Journal ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(session) = app.gate.session() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            session.username().to_string(),
            Style::default().fg(Color::White),
        ));
        if session.role() == Role::Admin {
            spans.push(Span::styled(" (admin)", Style::default().fg(Color::Magenta)));
        }
    }
    if app.busy {
        spans.push(Span::styled(
            "  Working...",
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(" (Esc: cancel)", Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_hints(app: &App) -> Line<'static> {
    match app.surface() {
        Surface::Login | Surface::Register => widgets::hint_line(&[("Ctrl+Q", "Quit")]),
        Surface::Dashboard => widgets::hint_line(&[
            ("Tab", "Next"),
            ("j/k", "Move"),
            ("/", "Search"),
            ("c", "Clear"),
            ("r", "Reload"),
            ("Ctrl+L", "Logout"),
            ("Ctrl+Q", "Quit"),
        ]),
        Surface::AdminDashboard => widgets::hint_line(&[
            ("Enter", "Create admin"),
            ("Ctrl+R", "Reload"),
            ("Ctrl+L", "Logout"),
            ("Ctrl+Q", "Quit"),
        ]),
    }
}

fn render_notice(frame: &mut Frame, notice: &Notice) {
    let area = utils::centered_rect(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let (title, color) = match notice.kind {
        NoticeKind::Info => (" Info ", Color::Green),
        NoticeKind::Error => (" Error ", Color::Red),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice.text.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        widgets::hint_line(&[("Enter", "Dismiss")]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(title, Style::default().fg(color)))
                .padding(Padding::horizontal(2)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
