use super::*;
use crate::app::{DashboardFocus, EntryFormField};
use crate::entries::{present, Field, ListPresentation, RowControl, RowPresentation};

/// Lines per rendered entry: header, title, content, controls, spacer.
const ROW_HEIGHT: usize = 5;

pub fn render_dashboard(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(body);

    render_new_entry(frame, app, chunks[0]);
    render_search(frame, app, chunks[1]);
    render_entries(frame, app, chunks[2]);
}

fn focus_block(title: &'static str, focused: bool) -> Block<'static> {
    let color = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(title, Style::default().fg(color)))
}

fn render_new_entry(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.dashboard_focus == DashboardFocus::NewEntry;
    let form = &app.entry_form;
    let lines = vec![
        widgets::input_line(
            "Title:   ",
            &form.title,
            focused && form.focused == EntryFormField::Title,
            false,
        ),
        widgets::input_line(
            "Content: ",
            &form.content,
            focused && form.focused == EntryFormField::Content,
            false,
        ),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(focus_block(" New entry ", focused)),
        area,
    );
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.dashboard_focus == DashboardFocus::Search;
    let line = widgets::input_line("ID: ", &app.search_input, focused, false);
    frame.render_widget(
        Paragraph::new(line).block(focus_block(" Search by ID ", focused)),
        area,
    );
}

fn render_entries(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.dashboard_focus == DashboardFocus::Entries;
    let presentation = present(&app.entries);
    let title = format!(" Journal ({}) ", presentation.row_count());
    let color = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(title, Style::default().fg(color)));

    let rows = match presentation {
        ListPresentation::Placeholder(text) => {
            let p = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
                .block(block);
            frame.render_widget(p, area);
            return;
        }
        ListPresentation::NotFound(text) => {
            let p = Paragraph::new(Span::styled(text, Style::default().fg(Color::Red))).block(block);
            frame.render_widget(p, area);
            return;
        }
        ListPresentation::Rows(rows) => rows,
    };

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row_lines(row, focused && i == app.focused_row))
        .collect();

    let inner_height = area.height.saturating_sub(2) as usize;
    let offset = utils::scroll_offset(app.focused_row * ROW_HEIGHT, ROW_HEIGHT, inner_height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

fn row_lines(row: &RowPresentation, is_focused: bool) -> Vec<Line<'static>> {
    let marker = if is_focused { "▶ " } else { "  " };
    let mut header = vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(format!("ID: {}", row.id), Style::default().fg(Color::DarkGray)),
    ];
    if let Some(date) = &row.date {
        header.push(Span::styled(
            format!("  {date}"),
            Style::default().fg(Color::Magenta),
        ));
    }

    vec![
        Line::from(header),
        field_line("  Title:   ", &row.title, Style::default().fg(Color::Cyan)),
        field_line("  Content: ", &row.content, Style::default().fg(Color::Gray)),
        controls_line(&row.controls, is_focused),
        Line::from(""),
    ]
}

fn field_line(label: &'static str, field: &Field, style: Style) -> Line<'static> {
    match field {
        Field::Static(value) => Line::from(vec![
            Span::styled(label, Style::default().fg(Color::DarkGray)),
            Span::styled(value.clone(), style),
        ]),
        Field::Input {
            value,
            cursor,
            focused,
        } => widgets::text_line(label, value, *cursor, *focused, false),
    }
}

fn control_hint(control: RowControl) -> (&'static str, &'static str) {
    match control {
        RowControl::Delete => ("d", "Delete"),
        RowControl::Edit => ("e", "Edit"),
        RowControl::Save => ("Ctrl+S", "Save"),
        RowControl::Cancel => ("Esc", "Cancel"),
    }
}

fn controls_line(controls: &[RowControl], is_focused: bool) -> Line<'static> {
    if !is_focused {
        let names: Vec<&str> = controls.iter().map(|c| control_hint(*c).1).collect();
        return Line::from(Span::styled(
            format!("  [{}]", names.join("] [")),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let mut hints: Vec<_> = controls.iter().map(|c| control_hint(*c)).collect();
    // Delete is Ctrl+D while the row's inputs take plain letters.
    if controls.contains(&RowControl::Save) {
        hints[0] = ("Ctrl+D", "Delete");
    }
    let mut line = widgets::hint_line(&hints);
    line.spans.insert(0, Span::raw("  "));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::logged_in;
    use crate::ui::tests::screen;
    use journal_api::MemoryJournalApi;

    async fn dashboard_with_two_rows() -> App {
        let api = MemoryJournalApi::new()
            .with_user("alice", "pw1")
            .with_entry("alice", "one", "first")
            .with_entry("alice", "two", "second");
        let mut app = App::new();
        app.gate = logged_in(&api, "alice", "pw1").await;
        app.entries.load_entries(&mut app.gate, &api).await.unwrap();
        app.dashboard_focus = DashboardFocus::Entries;
        app
    }

    fn line_with<'a>(out: &'a str, needle: &str) -> &'a str {
        out.lines()
            .find(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("no line contains {needle:?}:\n{out}"))
    }

    #[tokio::test]
    async fn viewing_rows_show_delete_then_edit() {
        let app = dashboard_with_two_rows().await;

        let out = screen(&app);

        assert!(line_with(&out, "Title:   one").contains("Title:   one"));
        assert!(line_with(&out, "d: Delete").contains("d: Delete  e: Edit"));
        assert!(line_with(&out, "[Delete]").contains("[Delete] [Edit]"));
        assert!(!out.contains("Save"));
    }

    #[tokio::test]
    async fn editing_row_shows_inputs_and_ctrl_d_delete() {
        let mut app = dashboard_with_two_rows().await;
        app.start_edit_focused();

        let out = screen(&app);

        assert!(line_with(&out, "Title:   one").contains("Title:   one█"));
        assert!(line_with(&out, "Ctrl+S")
            .contains("Ctrl+D: Delete  Ctrl+S: Save  Esc: Cancel"));
        assert!(!out.contains("e: Edit"));
        // The other row keeps its viewing controls.
        assert!(line_with(&out, "[Delete]").contains("[Delete] [Edit]"));
    }
}
