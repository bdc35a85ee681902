//! Field rendering utilities for forms

use crate::state::FieldName;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MASK: char = '•';

/// What to show inside an input box
pub fn display_value(value: &str, revealed: bool) -> String {
    if revealed {
        value.to_string()
    } else {
        MASK.to_string().repeat(value.chars().count())
    }
}

/// Draw a single-line input with its label on the border
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldName,
    value: &str,
    is_active: bool,
    revealed: bool,
    has_error: bool,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if has_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = Span::raw(display_value(value, revealed));

    let cursor = if is_active { "▌" } else { "" };

    let mut title = format!(" {} ", field.label());
    if field.is_secret() {
        let key = match field {
            FieldName::Password => crate::platform::TOGGLE_PASSWORD_SHORTCUT,
            _ => crate::platform::TOGGLE_CONFIRM_PASSWORD_SHORTCUT,
        };
        let action = if revealed { "hide" } else { "show" };
        title.push_str(&format!("({key}: {action}) "));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(Line::from(vec![
        content,
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));
    frame.render_widget(paragraph.block(block), area);
}

/// Draw the live error line under a field (blank when valid)
pub fn draw_field_error(frame: &mut Frame, area: Rect, message: Option<&str>) {
    if let Some(message) = message {
        let error = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)));
        frame.render_widget(error, area);
    }
}
