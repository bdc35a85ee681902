//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

pub use layout::FormLayout;

use crate::app::App;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = FormLayout::new(area);

    forms::draw_register(frame, &layout, &app.form.snapshot());
    layout::draw_status_bar(frame, layout.status, app);

    if let Some(message) = &app.error {
        render_error_dialog(frame, area, message);
    }
}
