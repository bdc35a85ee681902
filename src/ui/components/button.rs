//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button.
///
/// Enabled buttons take the accent color; a selected button is drawn bold.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Color,
) {
    let color = if is_enabled { accent } else { Color::DarkGray };

    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(color)
    };

    let mut text_style = Style::default().fg(color);
    if is_selected {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    let paragraph = Paragraph::new(content.to_string())
        .alignment(Alignment::Center)
        .style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
