//! Layout components (form geometry, status bar)
//!
//! The form geometry is a pure function of the terminal area so the mouse
//! handler can hit-test against exactly what was drawn.

use super::components::BUTTON_HEIGHT;
use crate::app::App;
use crate::state::{ButtonSlot, FieldName};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Outer panel size
pub const PANEL_WIDTH: u16 = 64;
pub const PANEL_HEIGHT: u16 = 29;

/// Register button width including borders
pub const REGISTER_BUTTON_WIDTH: u16 = 14;

/// Height of a bordered input field
pub const FIELD_HEIGHT: u16 = 3;

/// Positions of everything on the registration screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    pub panel: Rect,
    pub title: Rect,
    pub subtitle: Rect,
    pub fields: [Rect; 4],
    pub errors: [Rect; 4],
    pub agree: Rect,
    pub button_row: Rect,
    pub footer: Rect,
    pub status: Rect,
}

impl FormLayout {
    pub fn new(area: Rect) -> Self {
        // Reserve bottom line for status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let panel = centered(chunks[0], PANEL_WIDTH, PANEL_HEIGHT);
        // border + one cell of padding
        let inner = panel.inner(Margin::new(2, 2));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),             // Title
                Constraint::Length(1),             // Subtitle
                Constraint::Length(1),             // Spacer
                Constraint::Length(FIELD_HEIGHT),  // User name
                Constraint::Length(1),             // error
                Constraint::Length(FIELD_HEIGHT),  // Email
                Constraint::Length(1),             // error
                Constraint::Length(FIELD_HEIGHT),  // Password
                Constraint::Length(1),             // error
                Constraint::Length(FIELD_HEIGHT),  // Confirm password
                Constraint::Length(1),             // error
                Constraint::Length(1),             // Terms checkbox
                Constraint::Length(1),             // Spacer
                Constraint::Length(BUTTON_HEIGHT), // Register
                Constraint::Length(1),             // Login footer
                Constraint::Min(0),                // remaining space
            ])
            .split(inner);

        Self {
            panel,
            title: rows[0],
            subtitle: rows[1],
            fields: [rows[3], rows[5], rows[7], rows[9]],
            errors: [rows[4], rows[6], rows[8], rows[10]],
            agree: rows[11],
            button_row: rows[13],
            footer: rows[14],
            status: chunks[1],
        }
    }

    fn field_index(field: FieldName) -> usize {
        match field {
            FieldName::UserName => 0,
            FieldName::Email => 1,
            FieldName::Password => 2,
            FieldName::ConfirmPassword => 3,
        }
    }

    pub fn field(&self, field: FieldName) -> Rect {
        self.fields[Self::field_index(field)]
    }

    pub fn error(&self, field: FieldName) -> Rect {
        self.errors[Self::field_index(field)]
    }

    /// Where the Register button sits for a given slot
    pub fn button(&self, slot: ButtonSlot) -> Rect {
        let row = self.button_row;
        let width = REGISTER_BUTTON_WIDTH.min(row.width);
        Rect {
            x: row.x + slot.column_offset(row.width, width),
            y: row.y,
            width,
            height: row.height,
        }
    }

    /// Text field under a screen cell, if any
    pub fn field_at(&self, column: u16, row: u16) -> Option<FieldName> {
        let pos = Position::new(column, row);
        FieldName::ALL
            .into_iter()
            .find(|field| self.field(*field).contains(pos))
    }

    pub fn agree_contains(&self, column: u16, row: u16) -> bool {
        self.agree.contains(Position::new(column, row))
    }
}

/// Center a box of at most `width` x `height` inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Form validity
    let validity = if app.form.overall_valid() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(validity);

    spans.push(Span::styled(
        format!(
            "Tab:next  {}/{}:show passwords  {}:register",
            crate::platform::TOGGLE_PASSWORD_SHORTCUT,
            crate::platform::TOGGLE_CONFIRM_PASSWORD_SHORTCUT,
            crate::platform::SUBMIT_SHORTCUT,
        ),
        Style::default().fg(Color::Gray),
    ));

    let pending = app.form.validation().error_count();
    if pending > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{pending} to fix"),
            Style::default().fg(Color::Yellow),
        ));
    } else if app.form.policy().require_terms_agreement && !app.form.values().is_agree {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "accept the terms",
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Render quit hint on the right
    let quit_hint = " Esc:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}
