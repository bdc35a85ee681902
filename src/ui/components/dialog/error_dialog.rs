//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the submission error overlay
pub fn render_error_dialog(frame: &mut Frame, area: Rect, error_message: &str) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ];

    render_dialog(
        frame,
        area,
        DialogConfig {
            title: "Registration failed",
            accent: Color::Red,
            message: error_message,
            hint: Some(hint),
            max_width: 50,
        },
    );
}
