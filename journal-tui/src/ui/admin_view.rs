use super::*;
use crate::admin::AdminEntries;
use crate::app::CredentialsField;
use ratatui::{
    text::Text,
    widgets::{Cell, Row, Table},
};

pub fn render_admin_dashboard(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(body);

    render_create_admin(frame, app, chunks[0]);
    render_users(frame, app, chunks[1]);
}

fn render_create_admin(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.admin_form;
    let lines = vec![
        widgets::input_line(
            "Username: ",
            &form.username,
            form.focused == CredentialsField::Username,
            false,
        ),
        widgets::input_line(
            "Password: ",
            &form.password,
            form.focused == CredentialsField::Password,
            true,
        ),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Create admin "),
        ),
        area,
    );
}

fn render_users(frame: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .admin
        .rows()
        .into_iter()
        .map(|user| {
            let (entries, height) = match user.entries {
                AdminEntries::Listed(lines) => {
                    let height = lines.len().max(1);
                    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
                    (Text::from(text), height)
                }
                AdminEntries::Empty(placeholder) => (
                    Text::styled(placeholder, Style::default().fg(Color::DarkGray)),
                    1,
                ),
            };
            let name_style = if user.is_admin {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::Cyan)
            };
            Row::new(vec![
                Cell::from(user.serial.to_string()),
                Cell::from(Span::styled(user.user_name, name_style)),
                Cell::from(entries),
            ])
            .height(u16::try_from(height).unwrap_or(u16::MAX))
        })
        .collect();

    let header = Row::new(vec!["#", "User", "Entries"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(24),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Users "),
    );

    frame.render_widget(table, area);
}
