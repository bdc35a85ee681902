//! Registration form state container
//!
//! Owns the entered values, their validation, the Register button slot and
//! the two password visibility toggles. Every mutation goes through a method
//! here and leaves the container consistent before it returns.

use super::evasion::{on_hover_attempt, ButtonSlot};
use super::validation::{overall_valid, validate, ValidationPolicy, ValidationResult};
use super::values::{FieldName, FormValues};

/// Focusable rows of the form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(FieldName),
    Agree,
    Register,
}

impl FormFocus {
    const ORDER: [FormFocus; 6] = [
        FormFocus::Field(FieldName::UserName),
        FormFocus::Field(FieldName::Email),
        FormFocus::Field(FieldName::Password),
        FormFocus::Field(FieldName::ConfirmPassword),
        FormFocus::Agree,
        FormFocus::Register,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let current = self.index();
        if current == 0 {
            Self::ORDER[Self::ORDER.len() - 1]
        } else {
            Self::ORDER[current - 1]
        }
    }

    pub fn field(self) -> Option<FieldName> {
        match self {
            FormFocus::Field(field) => Some(field),
            _ => None,
        }
    }
}

impl Default for FormFocus {
    fn default() -> Self {
        FormFocus::Field(FieldName::UserName)
    }
}

/// Read-only view handed to the renderer after every change
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub values: FormValues,
    pub validation: ValidationResult,
    pub overall_valid: bool,
    pub button_slot: ButtonSlot,
    pub show_password: bool,
    pub show_confirm_password: bool,
    pub focus: FormFocus,
}

impl FormSnapshot {
    /// Whether a field's contents should be drawn in clear text
    pub fn is_revealed(&self, field: FieldName) -> bool {
        match field {
            FieldName::Password => self.show_password,
            FieldName::ConfirmPassword => self.show_confirm_password,
            _ => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterForm {
    values: FormValues,
    validation: ValidationResult,
    policy: ValidationPolicy,
    button_slot: ButtonSlot,
    show_password: bool,
    show_confirm_password: bool,
    focus: FormFocus,
}

impl RegisterForm {
    pub fn new(policy: ValidationPolicy) -> Self {
        let values = FormValues::default();
        Self {
            validation: validate(&values),
            values,
            policy,
            button_slot: ButtonSlot::default(),
            show_password: false,
            show_confirm_password: false,
            focus: FormFocus::default(),
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn button_slot(&self) -> ButtonSlot {
        self.button_slot
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn overall_valid(&self) -> bool {
        overall_valid(&self.validation, &self.values, self.policy)
    }

    /// Swap in a new snapshot and revalidate it before anyone can observe it
    fn replace_values(&mut self, values: FormValues) {
        self.validation = validate(&values);
        self.values = values;
        tracing::debug!(
            failing = ?self
                .validation
                .iter()
                .map(|(field, _)| field.key())
                .collect::<Vec<_>>(),
            overall_valid = self.overall_valid(),
            "form revalidated"
        );
    }

    pub fn set_field(&mut self, field: FieldName, value: String) {
        let next = self.values.with_field(field, value);
        self.replace_values(next);
    }

    /// Append a character to the focused text field
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.focus.field() {
            let mut value = self.values.get(field).to_string();
            value.push(c);
            self.set_field(field, value);
        }
    }

    /// Remove the last character of the focused text field
    pub fn backspace(&mut self) {
        if let Some(field) = self.focus.field() {
            let mut value = self.values.get(field).to_string();
            if value.pop().is_some() {
                self.set_field(field, value);
            }
        }
    }

    pub fn clear_field(&mut self, field: FieldName) {
        self.set_field(field, String::new());
    }

    pub fn set_agree(&mut self, is_agree: bool) {
        let next = self.values.with_agree(is_agree);
        self.replace_values(next);
    }

    pub fn toggle_agree(&mut self) {
        self.set_agree(!self.values.is_agree);
    }

    /// Pointer entered the Register button at `ratio` of its width
    pub fn hover(&mut self, ratio: f64) -> ButtonSlot {
        let next = on_hover_attempt(self.button_slot, self.overall_valid(), ratio);
        if next != self.button_slot {
            tracing::debug!(
                from = self.button_slot.label(),
                to = next.label(),
                "register button evaded"
            );
            self.button_slot = next;
        }
        self.button_slot
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn toggle_confirm_password_visibility(&mut self) {
        self.show_confirm_password = !self.show_confirm_password;
    }

    pub fn set_password_visibility(&mut self, show_password: bool, show_confirm_password: bool) {
        self.show_password = show_password;
        self.show_confirm_password = show_confirm_password;
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn set_focus(&mut self, focus: FormFocus) {
        self.focus = focus;
    }

    /// Hand out the payload if the form may be submitted.
    ///
    /// Returns `None` and leaves everything untouched while invalid.
    pub fn submit(&self) -> Option<FormValues> {
        if !self.overall_valid() {
            tracing::debug!("submit ignored, form invalid");
            return None;
        }
        Some(self.values.clone())
    }

    /// Start over after an accepted submission, keeping the policy and toggles
    pub fn reset(&mut self) {
        self.replace_values(FormValues::default());
        self.button_slot = ButtonSlot::default();
        self.focus = FormFocus::default();
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
            validation: self.validation.clone(),
            overall_valid: self.overall_valid(),
            button_slot: self.button_slot,
            show_password: self.show_password,
            show_confirm_password: self.show_confirm_password,
            focus: self.focus,
        }
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new(ValidationPolicy::default())
    }
}
