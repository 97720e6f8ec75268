//! Per-field validation
//!
//! Predicates operate on the canonical form of each value (digits, or
//! alphanumerics for lettered documents) against the country profile's
//! length rules. All of it is pure and total: no side effects, no panics.

use chrono::NaiveDate;

use crate::onboarding::country::{self, CountryProfile};
use crate::onboarding::draft::{Field, RegistrationDraft};
use crate::onboarding::format::{canonical, MaskedField};

/// Minimum password length accepted at submit.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Derived result of validating one field. Recomputed on every change,
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self { valid: true, message: None }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self { valid: false, message: Some(message.into()) }
    }
}

/// Validate a masked field value against its country's length rule.
pub fn validate_field(value: &str, field: MaskedField, country_code: &str) -> bool {
    let profile = country::lookup(country_code);
    let len = canonical(value, field, profile).chars().count();
    let rule = match field {
        MaskedField::PostalCode => profile.postal_rule,
        MaskedField::Document => profile.document_rule,
        MaskedField::Phone => profile.phone_rule,
    };
    rule.accepts(len)
}

/// Validate one draft field, phrasing messages with the profile's labels.
pub fn check(draft: &RegistrationDraft, field: Field) -> ValidationResult {
    let profile = country::lookup(&draft.country);
    let value = draft.get(field);

    match field {
        Field::Name => {
            if value.trim().chars().count() >= 2 {
                ValidationResult::ok()
            } else {
                ValidationResult::fail("Name must be at least 2 characters")
            }
        }
        Field::Email => {
            if value.contains('@') && !value.trim().is_empty() {
                ValidationResult::ok()
            } else {
                ValidationResult::fail("Invalid email address")
            }
        }
        Field::BirthDate => check_birth_date(value),
        Field::Document => check_masked(value, MaskedField::Document, profile),
        Field::Phone => check_masked(value, MaskedField::Phone, profile),
        Field::Country => {
            if value.trim().is_empty() {
                ValidationResult::fail("Country is required")
            } else {
                ValidationResult::ok()
            }
        }
        Field::PostalCode => check_masked(value, MaskedField::PostalCode, profile),
        Field::Street => require_non_empty(value, "Street is required"),
        Field::City => require_non_empty(value, "City is required"),
        Field::State => {
            // Present if and only if the country collects states.
            if !profile.has_states || !value.trim().is_empty() {
                ValidationResult::ok()
            } else {
                let label = profile.state_label.unwrap_or("State");
                ValidationResult::fail(format!("{} is required", label))
            }
        }
        Field::Password => {
            if value.chars().count() >= MIN_PASSWORD_LEN {
                ValidationResult::ok()
            } else {
                ValidationResult::fail(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LEN
                ))
            }
        }
        Field::ConfirmPassword => {
            if value == draft.password && !value.is_empty() {
                ValidationResult::ok()
            } else {
                ValidationResult::fail("Passwords do not match")
            }
        }
    }
}

fn check_masked(value: &str, field: MaskedField, profile: &CountryProfile) -> ValidationResult {
    let len = canonical(value, field, profile).chars().count();
    let (rule, label) = match field {
        MaskedField::PostalCode => (profile.postal_rule, profile.postal_code_label),
        MaskedField::Document => (profile.document_rule, profile.document_label),
        MaskedField::Phone => (profile.phone_rule, "Phone"),
    };
    if len == 0 {
        ValidationResult::fail(format!("{} is required", label))
    } else if rule.accepts(len) {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(format!("{} must have {} digits", label, rule))
    }
}

fn check_birth_date(value: &str) -> ValidationResult {
    let value = value.trim();
    if value.is_empty() {
        return ValidationResult::fail("Birth date is required");
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(_) => ValidationResult::ok(),
        Err(_) => ValidationResult::fail("Birth date must be YYYY-MM-DD"),
    }
}

fn require_non_empty(value: &str, message: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::fail(message)
    } else {
        ValidationResult::ok()
    }
}
