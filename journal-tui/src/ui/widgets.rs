use crate::text_input::TextInput;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const CURSOR: &str = "█";

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// `Label: value` with a block cursor when focused. Masked inputs show one
/// bullet per character.
pub fn input_line<'a>(label: &'a str, input: &TextInput, focused: bool, masked: bool) -> Line<'a> {
    text_line(label, &input.value, input.cursor, focused, masked)
}

pub fn text_line<'a>(
    label: &'a str,
    value: &str,
    cursor: usize,
    focused: bool,
    masked: bool,
) -> Line<'a> {
    let (before, after) = if masked {
        let before = value[..cursor].chars().count();
        let after = value[cursor..].chars().count();
        ("•".repeat(before), "•".repeat(after))
    } else {
        (value[..cursor].to_string(), value[cursor..].to_string())
    };

    let mut spans = vec![
        Span::styled(label, label_style(focused)),
        Span::styled(before, value_style(focused)),
    ];
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled(after, value_style(focused)));
    Line::from(spans)
}

/// `Key: action` pairs separated by two spaces.
pub fn hint_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        let sep = if i + 1 < hints.len() { "  " } else { "" };
        spans.push(Span::raw(format!(": {action}{sep}")));
    }
    Line::from(spans)
}
