//! Registration form rendering

use super::field_renderer::{draw_field, draw_field_error};
use crate::state::{FieldName, FormFocus, FormSnapshot};
use crate::ui::components::render_button;
use crate::ui::layout::FormLayout;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const TITLE: &str = "Welcome To CodeTikki from Nikki!";
pub const SUBTITLE: &str = "create your codeTikki account";
pub const AGREE_LABEL: &str = "I agree to the terms and privacy policy";
pub const REGISTER_LABEL: &str = "Register";

/// Draw the registration panel from one consistent snapshot
pub fn draw_register(frame: &mut Frame, layout: &FormLayout, snapshot: &FormSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    frame.render_widget(block, layout.panel);

    frame.render_widget(
        Paragraph::new(TITLE).style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        layout.title,
    );
    frame.render_widget(Paragraph::new(SUBTITLE), layout.subtitle);

    for field in FieldName::ALL {
        let message = snapshot.validation.message(field);
        draw_field(
            frame,
            layout.field(field),
            field,
            snapshot.values.get(field),
            snapshot.focus == FormFocus::Field(field),
            snapshot.is_revealed(field),
            message.is_some(),
        );
        draw_field_error(frame, layout.error(field), message.as_deref());
    }

    draw_agree(frame, layout, snapshot);

    render_button(
        frame,
        layout.button(snapshot.button_slot),
        REGISTER_LABEL,
        snapshot.focus == FormFocus::Register,
        snapshot.overall_valid,
        Color::Green,
    );

    let footer = Line::from(vec![
        Span::raw("Already have an account? "),
        Span::styled(
            "Login",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(footer).alignment(Alignment::Center),
        layout.footer,
    );
}

fn draw_agree(frame: &mut Frame, layout: &FormLayout, snapshot: &FormSnapshot) {
    let is_active = snapshot.focus == FormFocus::Agree;
    let mark = if snapshot.values.is_agree { "[x] " } else { "[ ] " };
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let line = Line::from(vec![
        Span::styled(mark, style.add_modifier(Modifier::BOLD)),
        Span::styled(AGREE_LABEL, style),
    ]);
    frame.render_widget(Paragraph::new(line), layout.agree);
}
