//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    pub accent: Color,
    /// Message content, may contain `\n`
    pub message: &'a str,
    /// Hint shown under the message
    pub hint: Option<Vec<Span<'a>>>,
    pub max_width: u16,
}

/// Render a dialog centered in `area`
pub fn render_dialog(frame: &mut Frame, area: Rect, config: DialogConfig) {
    // borders + one column of padding on each side
    let chrome = 4u16;
    let width = config.max_width.min(area.width);
    let lines = wrap_words(config.message, width.saturating_sub(chrome) as usize);

    let hint_rows = if config.hint.is_some() { 2 } else { 0 };
    let height = (lines.len() as u16 + 2 + hint_rows + 2).min(area.height);

    let dialog_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(lines.into_iter().map(Line::from));
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.accent))
        .style(Style::default().bg(Color::Black))
        .padding(Padding::horizontal(1));

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(Paragraph::new(content).block(block), dialog_area);
}

/// Greedy word wrap on whitespace; words longer than `width` get their own line
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.len()
            } else {
                line.len() + 1 + word.len()
            };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
