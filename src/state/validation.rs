//! Field validation rules
//!
//! Each field owns an ordered list of rules. All fields are checked on every
//! run, but within one field only the first failing rule is reported, so the
//! declaration order below is part of the contract.

use super::values::{FieldName, FormValues};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum length for user names and passwords
pub const MIN_LENGTH: usize = 6;

static USER_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("USER_NAME_PATTERN failed"));

/// `local@domain`, where the domain is dot-separated labels of up to 63 chars.
/// A top-level domain is not required.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("EMAIL_PATTERN failed")
});

/// A single failed rule. The display text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("User name is required")]
    UserNameRequired,
    #[error("User name must have at least 6 characters")]
    UserNameTooShort,
    #[error("User name must contain only letters and numbers")]
    UserNameNotAlphanumeric,
    #[error("Email is required")]
    EmailRequired,
    #[error("Must be a valid email")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Confirm Password is required")]
    ConfirmPasswordRequired,
    #[error("Passwords must match")]
    PasswordsMismatch,
}

struct Rule {
    passes: fn(&FormValues) -> bool,
    error: FieldError,
}

fn is_present(value: &str) -> bool {
    !value.is_empty()
}

fn has_min_length(value: &str) -> bool {
    value.chars().count() >= MIN_LENGTH
}

const USER_NAME_RULES: &[Rule] = &[
    Rule {
        passes: |v| is_present(&v.user_name),
        error: FieldError::UserNameRequired,
    },
    Rule {
        passes: |v| has_min_length(&v.user_name),
        error: FieldError::UserNameTooShort,
    },
    Rule {
        passes: |v| USER_NAME_PATTERN.is_match(&v.user_name),
        error: FieldError::UserNameNotAlphanumeric,
    },
];

const EMAIL_RULES: &[Rule] = &[
    Rule {
        passes: |v| is_present(&v.email),
        error: FieldError::EmailRequired,
    },
    Rule {
        passes: |v| EMAIL_PATTERN.is_match(&v.email),
        error: FieldError::EmailInvalid,
    },
];

const PASSWORD_RULES: &[Rule] = &[
    Rule {
        passes: |v| is_present(&v.password),
        error: FieldError::PasswordRequired,
    },
    Rule {
        passes: |v| has_min_length(&v.password),
        error: FieldError::PasswordTooShort,
    },
];

// Required is checked before the match so an empty confirmation never
// reports a mismatch.
const CONFIRM_PASSWORD_RULES: &[Rule] = &[
    Rule {
        passes: |v| is_present(&v.confirm_password),
        error: FieldError::ConfirmPasswordRequired,
    },
    Rule {
        passes: |v| v.confirm_password == v.password,
        error: FieldError::PasswordsMismatch,
    },
];

fn rules_for(field: FieldName) -> &'static [Rule] {
    match field {
        FieldName::UserName => USER_NAME_RULES,
        FieldName::Email => EMAIL_RULES,
        FieldName::Password => PASSWORD_RULES,
        FieldName::ConfirmPassword => CONFIRM_PASSWORD_RULES,
    }
}

/// Run one field's rules and return the first failure
pub fn validate_field(values: &FormValues, field: FieldName) -> Option<FieldError> {
    rules_for(field)
        .iter()
        .find(|rule| !(rule.passes)(values))
        .map(|rule| rule.error)
}

/// Errors for one snapshot, keyed by field. A missing entry means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<FieldName, FieldError>,
}

impl ValidationResult {
    pub fn error(&self, field: FieldName) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn message(&self, field: FieldName) -> Option<String> {
        self.error(field).map(|e| e.to_string())
    }

    /// True when no field has an error
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Errors in field order
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }
}

/// Validate every field of a snapshot
pub fn validate(values: &FormValues) -> ValidationResult {
    let errors = FieldName::ALL
        .iter()
        .filter_map(|&field| validate_field(values, field).map(|error| (field, error)))
        .collect();
    ValidationResult { errors }
}

/// Which extra conditions gate submission beyond the field rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Also require the terms checkbox. Off by default: the checkbox is
    /// informational unless a deployment opts in.
    pub require_terms_agreement: bool,
}

/// Whether a snapshot may be submitted
pub fn overall_valid(
    result: &ValidationResult,
    values: &FormValues,
    policy: ValidationPolicy,
) -> bool {
    result.is_valid() && (!policy.require_terms_agreement || values.is_agree)
}
