//! Form rendering module
//!
//! - `field_renderer`: input box and error line rendering
//! - `register_form`: the registration panel

mod field_renderer;
mod register_form;

pub use register_form::draw_register;
#[cfg(test)]
pub use register_form::{AGREE_LABEL, REGISTER_LABEL, SUBTITLE, TITLE};
