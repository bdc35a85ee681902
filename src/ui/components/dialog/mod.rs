//! Dialog overlays

mod base;
mod error_dialog;

pub use error_dialog::render_error_dialog;
