//! Registration draft - the in-progress, not-yet-submitted account data
//!
//! The draft is owned exclusively by one wizard instance for its lifetime.
//! It is created when the wizard starts and dropped on successful submit or
//! abandonment; nothing is persisted across runs.

use serde::{Deserialize, Serialize};

use crate::onboarding::country::{self, DocumentKind};
use crate::onboarding::format::{canonical, MaskedField};

/// Every field collected by the registration wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    BirthDate,
    Document,
    Phone,
    Country,
    PostalCode,
    Street,
    City,
    State,
    Password,
    ConfirmPassword,
}

impl Field {
    /// The display mask this field carries, if any.
    pub fn mask(&self) -> Option<MaskedField> {
        match self {
            Field::PostalCode => Some(MaskedField::PostalCode),
            Field::Document => Some(MaskedField::Document),
            Field::Phone => Some(MaskedField::Phone),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::BirthDate => "birth_date",
            Field::Document => "document",
            Field::Phone => "phone",
            Field::Country => "country",
            Field::PostalCode => "postal_code",
            Field::Street => "street",
            Field::City => "city",
            Field::State => "state",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The mutable registration draft. Masked fields hold their display form;
/// [`RegistrationDraft::canonical`] projects them back to canonical form for
/// the account-creation collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub birth_date: String,
    pub document: String,
    pub phone: String,
    pub country: String,
    pub postal_code: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub password: String,
    pub confirm_password: String,
}

/// Canonical registration payload handed to the account gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub country: String,
    pub postal_code: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub document: String,
    pub birth_date: String,
}

impl RegistrationDraft {
    /// Create a draft with the given default country selected.
    pub fn with_country(country: &str) -> Self {
        Self {
            country: country.to_string(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::BirthDate => &self.birth_date,
            Field::Document => &self.document,
            Field::Phone => &self.phone,
            Field::Country => &self.country,
            Field::PostalCode => &self.postal_code,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::BirthDate => &mut self.birth_date,
            Field::Document => &mut self.document,
            Field::Phone => &mut self.phone,
            Field::Country => &mut self.country,
            Field::PostalCode => &mut self.postal_code,
            Field::Street => &mut self.street,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value;
    }

    /// Canonical (digit-only) form of the postal code.
    pub fn canonical_postal_code(&self) -> String {
        let profile = country::lookup(&self.country);
        canonical(&self.postal_code, MaskedField::PostalCode, profile)
    }

    /// Project the draft into the canonical payload for persistence.
    /// Masked fields are stripped back to digits; lettered documents keep
    /// their uppercase alphanumerics.
    pub fn canonical(&self) -> NewAccount {
        let profile = country::lookup(&self.country);
        NewAccount {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            country: self.country.clone(),
            postal_code: canonical(&self.postal_code, MaskedField::PostalCode, profile),
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            phone: canonical(&self.phone, MaskedField::Phone, profile),
            document: canonical(&self.document, MaskedField::Document, profile),
            birth_date: self.birth_date.trim().to_string(),
        }
    }

    /// Whether this draft's document format carries letters.
    pub fn document_is_alphanumeric(&self) -> bool {
        country::lookup(&self.country).document_kind == DocumentKind::Alphanumeric
    }
}
