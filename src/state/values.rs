//! Registration form values

use serde::Serialize;
use std::fmt;

/// The validated text fields of the registration form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    UserName,
    Email,
    Password,
    ConfirmPassword,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [
        FieldName::UserName,
        FieldName::Email,
        FieldName::Password,
        FieldName::ConfirmPassword,
    ];

    /// Key used in the serialized payload
    pub fn key(&self) -> &'static str {
        match self {
            Self::UserName => "userName",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    /// Placeholder shown on the input box
    pub fn label(&self) -> &'static str {
        match self {
            Self::UserName => "User name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
        }
    }

    /// Whether the value is masked by default
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

/// Snapshot of everything the user has entered.
///
/// Snapshots are replaced whole on every change, never patched in place.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub is_agree: bool,
}

impl FormValues {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::UserName => &self.user_name,
            FieldName::Email => &self.email,
            FieldName::Password => &self.password,
            FieldName::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Build the next snapshot with one text field replaced
    pub fn with_field(&self, field: FieldName, value: String) -> Self {
        let mut next = self.clone();
        match field {
            FieldName::UserName => next.user_name = value,
            FieldName::Email => next.email = value,
            FieldName::Password => next.password = value,
            FieldName::ConfirmPassword => next.confirm_password = value,
        }
        next
    }

    pub fn with_agree(&self, is_agree: bool) -> Self {
        Self {
            is_agree,
            ..self.clone()
        }
    }
}

impl fmt::Debug for FormValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValues")
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("is_agree", &self.is_agree)
            .finish()
    }
}
