//! Onboarding module - the registration domain
//!
//! Country profiles drive formatting and validation; the wizard state
//! machine sequences the three registration sections over them.

pub mod country;
pub mod draft;
pub mod format;
pub mod validate;
pub mod wizard;

pub use country::{CountryProfile, DocumentKind, LengthRule, COUNTRIES, GENERIC};
pub use draft::{Field, NewAccount, RegistrationDraft};
pub use format::{format_field, MaskedField};
pub use validate::{check, validate_field, ValidationResult, MIN_PASSWORD_LEN};
pub use wizard::{
    AdvanceError, FieldProblem, LookupTicket, RegistrationWizard, Section, SubmitError,
};
