use super::*;
use crate::app::{CredentialsField, CredentialsForm};

pub fn render_login(frame: &mut Frame, app: &App, body: Rect) {
    render_credentials_box(
        frame,
        body,
        " Login ",
        &app.login_form,
        &[("Enter", "Login"), ("Tab", "Switch field"), ("Ctrl+R", "Register")],
    );
}

pub fn render_register(frame: &mut Frame, app: &App, body: Rect) {
    render_credentials_box(
        frame,
        body,
        " Register ",
        &app.register_form,
        &[("Enter", "Register"), ("Tab", "Switch field"), ("Esc", "Back")],
    );
}

fn render_credentials_box(
    frame: &mut Frame,
    body: Rect,
    title: &'static str,
    form: &CredentialsForm,
    hints: &[(&'static str, &'static str)],
) {
    let area = utils::centered_rect(56, 9, body);

    let lines = vec![
        Line::from(""),
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
        Line::from(""),
        widgets::hint_line(hints),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(title, Style::default().fg(Color::Cyan)))
            .padding(Padding::horizontal(2)),
    );

    frame.render_widget(paragraph, area);
}
