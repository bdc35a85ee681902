//! Registration form state
//!
//! Pure, synchronous core: values, validation rules, the Register button
//! evasion machine and the container tying them together.

mod evasion;
mod form;
mod validation;
mod values;

pub use evasion::{pointer_ratio, ButtonSlot};
pub use form::{FormFocus, FormSnapshot, RegisterForm};
pub use validation::ValidationPolicy;
pub use values::{FieldName, FormValues};

#[cfg(test)]
pub use validation::FieldError;
