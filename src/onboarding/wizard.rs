//! Registration wizard state machine
//!
//! Three ordered sections (personal, address, security). Forward transitions
//! are gated on per-section completeness; backward transitions are always
//! allowed. The wizard owns the draft for its whole lifetime and sequences
//! the single-shot postal lookup through numbered tickets, so a stale
//! response from a superseded request can never overwrite newer input.

use thiserror::Error;

use crate::core::directory::{DirectoryError, PostalAddress};
use crate::core::gateway::AccountGateway;
use crate::core::session::AuthSession;
use crate::onboarding::draft::{Field, RegistrationDraft};
use crate::onboarding::format::{format_field, MaskedField};
use crate::onboarding::validate::{check, ValidationResult};

/// The wizard's three sections, in order. Exactly one is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Personal,
    Address,
    Security,
}

impl Section {
    /// Fields collected by this section, in prompt order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Section::Personal => &[
                Field::Name,
                Field::Email,
                Field::BirthDate,
                Field::Document,
                Field::Phone,
            ],
            Section::Address => &[
                Field::Country,
                Field::PostalCode,
                Field::Street,
                Field::City,
                Field::State,
            ],
            Section::Security => &[Field::Password, Field::ConfirmPassword],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Personal => "Personal data",
            Section::Address => "Address",
            Section::Security => "Security",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// One field that failed validation, with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldProblem {
    pub field: Field,
    pub message: String,
}

/// A forward transition was blocked by incomplete or invalid fields.
/// Recoverable: fix the listed fields and advance again.
#[derive(Debug, Error)]
#[error("{section} section has {} field(s) needing attention", problems.len())]
pub struct AdvanceError {
    pub section: Section,
    pub problems: Vec<FieldProblem>,
}

/// Submit failures. `Rejected` carries the single banner message surfaced
/// to the user; the draft and section are preserved for retry.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submit is only available from the security section")]
    NotReady,

    #[error("{} field(s) needing attention", problems.len())]
    Invalid { problems: Vec<FieldProblem> },

    #[error("{0}")]
    Rejected(String),
}

/// A postal lookup request issued by the wizard. The id sequences
/// responses: only the latest ticket's outcome is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub id: u64,
    /// Canonical 8-digit CEP to search.
    pub postal_code: String,
}

/// The registration wizard. Owns the draft exclusively until submit.
#[derive(Debug)]
pub struct RegistrationWizard {
    draft: RegistrationDraft,
    section: Section,
    last_requested: Option<String>,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl RegistrationWizard {
    pub fn new(default_country: &str) -> Self {
        Self {
            draft: RegistrationDraft::with_country(default_country),
            section: Section::Personal,
            last_requested: None,
            in_flight: None,
            next_ticket: 1,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Whether a postal lookup is currently in flight (the postal code
    /// field is shown busy while it is).
    pub fn lookup_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply a raw input value to a field. Masked fields are formatted on
    /// the way in, so the draft always holds the display form.
    pub fn set_field(&mut self, field: Field, raw: &str) {
        let value = match field.mask() {
            Some(mask) => format_field(raw, mask, &self.draft.country),
            None => raw.to_string(),
        };
        self.draft.set(field, value);

        // Changing country invalidates the display form of every mask.
        if field == Field::Country {
            for mask in MaskedField::all() {
                let f = match mask {
                    MaskedField::PostalCode => Field::PostalCode,
                    MaskedField::Document => Field::Document,
                    MaskedField::Phone => Field::Phone,
                };
                let reformatted = format_field(self.draft.get(f), *mask, &self.draft.country);
                self.draft.set(f, reformatted);
            }
        }
    }

    /// Current validation state of one field. Derived, never stored.
    pub fn validation(&self, field: Field) -> ValidationResult {
        check(&self.draft, field)
    }

    /// Issue a postal lookup ticket if the side-effect conditions hold:
    /// on the address section, country BR, a complete 8-digit CEP, an empty
    /// street, and a value not already searched. At most one ticket per
    /// distinct completed value; the last searched value is remembered
    /// across edits, so clearing and retyping the same code never searches
    /// twice.
    pub fn pending_lookup(&mut self) -> Option<LookupTicket> {
        if self.section != Section::Address {
            return None;
        }
        if !self.draft.country.eq_ignore_ascii_case("BR") {
            return None;
        }
        if !self.draft.street.trim().is_empty() {
            return None;
        }
        let code = self.draft.canonical_postal_code();
        if code.len() != 8 {
            return None;
        }
        if self.last_requested.as_deref() == Some(code.as_str()) {
            return None;
        }

        let id = self.next_ticket;
        self.next_ticket += 1;
        self.last_requested = Some(code.clone());
        // A newer ticket supersedes any still in flight; the old response
        // will be discarded by the id check in resolve_lookup.
        self.in_flight = Some(id);
        Some(LookupTicket { id, postal_code: code })
    }

    /// Apply the outcome of a lookup ticket. Stale tickets (superseded by a
    /// newer request) are discarded. Errors and not-found outcomes degrade
    /// silently: fields stay untouched and nothing is surfaced.
    pub fn resolve_lookup(
        &mut self,
        ticket_id: u64,
        outcome: Result<Option<PostalAddress>, DirectoryError>,
    ) {
        if self.in_flight != Some(ticket_id) {
            return;
        }
        self.in_flight = None;

        if let Ok(Some(address)) = outcome {
            self.draft.street = address.street;
            self.draft.city = address.city;
            self.draft.state = address.state;
            self.draft.postal_code =
                format_field(&address.postal_code, MaskedField::PostalCode, &self.draft.country);
        }
    }

    /// Collect validation problems for a slice of fields.
    fn problems(&self, fields: &[Field]) -> Vec<FieldProblem> {
        fields
            .iter()
            .filter_map(|&field| {
                let result = check(&self.draft, field);
                if result.valid {
                    None
                } else {
                    Some(FieldProblem {
                        field,
                        message: result.message.unwrap_or_else(|| "Invalid value".to_string()),
                    })
                }
            })
            .collect()
    }

    /// Advance one section forward. Blocked unless every field of the
    /// current section validates. Advancing from the final section is a
    /// no-op; submit is the terminal action.
    pub fn advance(&mut self) -> Result<Section, AdvanceError> {
        let next = match self.section {
            Section::Personal => Section::Address,
            Section::Address => Section::Security,
            Section::Security => return Ok(Section::Security),
        };
        let problems = self.problems(self.section.fields());
        if problems.is_empty() {
            self.section = next;
            Ok(next)
        } else {
            Err(AdvanceError { section: self.section, problems })
        }
    }

    /// Step one section back. Always allowed, unconditionally.
    pub fn back(&mut self) -> Section {
        self.section = match self.section {
            Section::Personal => Section::Personal,
            Section::Address => Section::Personal,
            Section::Security => Section::Address,
        };
        self.section
    }

    /// Submit the registration. Only reachable from the security section;
    /// re-checks every prior-section invariant, then calls the gateway
    /// exactly once with the canonical payload. On rejection the wizard is
    /// left untouched so the user can retry.
    pub fn submit(&mut self, gateway: &dyn AccountGateway) -> Result<AuthSession, SubmitError> {
        if self.section != Section::Security {
            return Err(SubmitError::NotReady);
        }

        let mut problems = Vec::new();
        for section in [Section::Personal, Section::Address, Section::Security] {
            problems.extend(self.problems(section.fields()));
        }
        if !problems.is_empty() {
            return Err(SubmitError::Invalid { problems });
        }

        gateway
            .register(&self.draft.canonical())
            .map_err(|e| SubmitError::Rejected(e.to_string()))
    }
}

/// Run a ready lookup against a directory and feed the result back.
/// Returns whether a lookup was due and ran. Errors are swallowed:
/// lookup failure means "no data".
pub fn run_lookup(
    wizard: &mut RegistrationWizard,
    directory: &dyn crate::core::directory::PostalDirectory,
) -> bool {
    match wizard.pending_lookup() {
        Some(ticket) => {
            let outcome = directory.search(&ticket.postal_code);
            wizard.resolve_lookup(ticket.id, outcome);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directory::{PostalDirectory, StaticDirectory};
    use crate::core::gateway::GatewayError;
    use crate::onboarding::draft::NewAccount;
    use chrono::Utc;
    use std::cell::RefCell;

    /// Gateway double that records every register call.
    struct RecordingGateway {
        calls: RefCell<Vec<NewAccount>>,
        reject: bool,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self { calls: RefCell::new(Vec::new()), reject: false }
        }

        fn rejecting() -> Self {
            Self { calls: RefCell::new(Vec::new()), reject: true }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl AccountGateway for RecordingGateway {
        fn register(&self, account: &NewAccount) -> Result<AuthSession, GatewayError> {
            self.calls.borrow_mut().push(account.clone());
            if self.reject {
                return Err(GatewayError::Rejected("Account creation failed".to_string()));
            }
            Ok(AuthSession {
                token: "tok".to_string(),
                user_id: "u1".to_string(),
                email: account.email.clone(),
                name: account.name.clone(),
                created: Utc::now(),
            })
        }

        fn login(&self, _email: &str, _password: &str) -> Result<AuthSession, GatewayError> {
            unreachable!("wizard never logs in");
        }
    }

    fn fill_personal(wizard: &mut RegistrationWizard) {
        wizard.set_field(Field::Name, "Jo Silva");
        wizard.set_field(Field::Email, "jo@example.com");
        wizard.set_field(Field::BirthDate, "1990-04-12");
        wizard.set_field(Field::Document, "12345678901");
        wizard.set_field(Field::Phone, "11987654321");
    }

    fn fill_address(wizard: &mut RegistrationWizard) {
        wizard.set_field(Field::PostalCode, "04538132");
        wizard.set_field(Field::Street, "Avenida Faria Lima");
        wizard.set_field(Field::City, "São Paulo");
        wizard.set_field(Field::State, "SP");
    }

    fn wizard_at_security() -> RegistrationWizard {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        wizard.advance().unwrap();
        fill_address(&mut wizard);
        wizard.advance().unwrap();
        wizard
    }

    #[test]
    fn test_starts_on_personal_with_default_country() {
        let wizard = RegistrationWizard::new("BR");
        assert_eq!(wizard.section(), Section::Personal);
        assert_eq!(wizard.draft().country, "BR");
    }

    #[test]
    fn test_set_field_formats_masked_input() {
        let mut wizard = RegistrationWizard::new("BR");
        wizard.set_field(Field::Document, "12345678901");
        assert_eq!(wizard.draft().document, "123.456.789-01");
        wizard.set_field(Field::Phone, "11987654321");
        assert_eq!(wizard.draft().phone, "(11) 98765-4321");
    }

    #[test]
    fn test_country_change_reformats_masked_fields() {
        let mut wizard = RegistrationWizard::new("BR");
        wizard.set_field(Field::PostalCode, "12345678");
        assert_eq!(wizard.draft().postal_code, "12345-678");
        wizard.set_field(Field::Country, "US");
        assert_eq!(wizard.draft().postal_code, "12345-678");
        wizard.set_field(Field::Country, "DE");
        assert_eq!(wizard.draft().postal_code, "12345678");
    }

    #[test]
    fn test_cannot_advance_with_invalid_document() {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        wizard.set_field(Field::Document, "1234567");

        let err = wizard.advance().unwrap_err();
        assert_eq!(err.section, Section::Personal);
        assert!(err.problems.iter().any(|p| p.field == Field::Document));
        assert_eq!(wizard.section(), Section::Personal);
    }

    #[test]
    fn test_advance_reports_all_problems() {
        let mut wizard = RegistrationWizard::new("BR");
        let err = wizard.advance().unwrap_err();
        assert_eq!(err.problems.len(), Section::Personal.fields().len());
    }

    #[test]
    fn test_advance_and_back() {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        assert_eq!(wizard.advance().unwrap(), Section::Address);
        // Back is unconditional even with the address incomplete
        assert_eq!(wizard.back(), Section::Personal);
        assert_eq!(wizard.back(), Section::Personal);
    }

    #[test]
    fn test_state_required_only_for_state_countries() {
        let mut wizard = RegistrationWizard::new("PT");
        fill_personal(&mut wizard);
        wizard.set_field(Field::Document, "123456789");
        wizard.set_field(Field::Phone, "912345678");
        wizard.advance().unwrap();
        wizard.set_field(Field::PostalCode, "1234567");
        wizard.set_field(Field::Street, "Rua Augusta");
        wizard.set_field(Field::City, "Lisboa");
        assert_eq!(wizard.advance().unwrap(), Section::Security);
    }

    #[test]
    fn test_lookup_fires_once_per_value() {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        wizard.advance().unwrap();

        wizard.set_field(Field::PostalCode, "01310100");
        let ticket = wizard.pending_lookup().expect("first completed CEP triggers lookup");
        assert_eq!(ticket.postal_code, "01310100");

        // Same value again, still unresolved: no second ticket
        assert!(wizard.pending_lookup().is_none());
        wizard.resolve_lookup(ticket.id, Ok(None));
        assert!(wizard.pending_lookup().is_none());
    }

    #[test]
    fn test_same_cep_after_clearing_does_not_search_again() {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        wizard.advance().unwrap();

        // Unknown CEP: resolves not-found, street stays empty
        wizard.set_field(Field::PostalCode, "99999999");
        let ticket = wizard.pending_lookup().unwrap();
        wizard.resolve_lookup(ticket.id, Ok(None));

        // Clearing and retyping the same value must not fire a second lookup
        wizard.set_field(Field::PostalCode, "9999");
        wizard.set_field(Field::PostalCode, "99999999");
        assert!(wizard.pending_lookup().is_none());
    }

    #[test]
    fn test_different_cep_after_clearing_triggers_lookup() {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        wizard.advance().unwrap();

        wizard.set_field(Field::PostalCode, "01310100");
        let first = wizard.pending_lookup().unwrap();
        wizard.resolve_lookup(first.id, Ok(None));

        wizard.set_field(Field::PostalCode, "0131");
        wizard.set_field(Field::PostalCode, "20040020");
        let second = wizard.pending_lookup().expect("a different completed CEP re-triggers");
        assert_eq!(second.postal_code, "20040020");
        assert!(second.id > first.id);
    }

    #[test]
    fn test_lookup_requires_address_section_and_br() {
        let mut wizard = RegistrationWizard::new("BR");
        wizard.set_field(Field::PostalCode, "01310100");
        // Still on personal: no ticket
        assert!(wizard.pending_lookup().is_none());

        let mut wizard = RegistrationWizard::new("US");
        fill_personal(&mut wizard);
        wizard.set_field(Field::Document, "123456789");
        wizard.set_field(Field::Phone, "2125551234");
        wizard.advance().unwrap();
        wizard.set_field(Field::PostalCode, "12345678");
        assert!(wizard.pending_lookup().is_none());
    }

    #[test]
    fn test_lookup_skipped_when_street_filled() {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        wizard.advance().unwrap();
        wizard.set_field(Field::Street, "Rua Já Preenchida");
        wizard.set_field(Field::PostalCode, "01310100");
        assert!(wizard.pending_lookup().is_none());
    }

    #[test]
    fn test_lookup_success_fills_fields() {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        wizard.advance().unwrap();
        wizard.set_field(Field::PostalCode, "01310100");

        run_lookup(&mut wizard, &StaticDirectory);
        assert_eq!(wizard.draft().street, "Avenida Paulista");
        assert_eq!(wizard.draft().city, "São Paulo");
        assert_eq!(wizard.draft().state, "SP");
        assert_eq!(wizard.draft().postal_code, "01310-100");
        assert!(!wizard.lookup_busy());
    }

    #[test]
    fn test_lookup_failure_is_silent() {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        wizard.advance().unwrap();
        wizard.set_field(Field::PostalCode, "01310100");

        let ticket = wizard.pending_lookup().unwrap();
        wizard.resolve_lookup(
            ticket.id,
            Err(DirectoryError::Unavailable("timeout".to_string())),
        );
        assert_eq!(wizard.draft().street, "");
        assert!(!wizard.lookup_busy());
    }

    #[test]
    fn test_stale_lookup_response_discarded() {
        let mut wizard = RegistrationWizard::new("BR");
        fill_personal(&mut wizard);
        wizard.advance().unwrap();

        wizard.set_field(Field::PostalCode, "01310100");
        let first = wizard.pending_lookup().unwrap();

        // User retypes a different CEP while the first request is in flight
        wizard.set_field(Field::PostalCode, "0131");
        wizard.set_field(Field::PostalCode, "20040020");
        let second = wizard.pending_lookup().unwrap();

        // First response resolves late: discarded
        wizard.resolve_lookup(
            first.id,
            Ok(Some(PostalAddress {
                street: "Avenida Paulista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
                postal_code: "01310-100".to_string(),
            })),
        );
        assert_eq!(wizard.draft().street, "");
        assert!(wizard.lookup_busy());

        // Latest response wins
        wizard.resolve_lookup(
            second.id,
            Ok(Some(PostalAddress {
                street: "Praça Mauá".to_string(),
                city: "Rio de Janeiro".to_string(),
                state: "RJ".to_string(),
                postal_code: "20040-020".to_string(),
            })),
        );
        assert_eq!(wizard.draft().street, "Praça Mauá");
        assert_eq!(wizard.draft().postal_code, "20040-020");
    }

    #[test]
    fn test_submit_calls_register_once_with_canonical_values() {
        let mut wizard = wizard_at_security();
        wizard.set_field(Field::Password, "abcdef");
        wizard.set_field(Field::ConfirmPassword, "abcdef");

        let gateway = RecordingGateway::new();
        let session = wizard.submit(&gateway).unwrap();
        assert_eq!(gateway.call_count(), 1);
        assert_eq!(session.email, "jo@example.com");

        let calls = gateway.calls.borrow();
        let account = &calls[0];
        assert_eq!(account.postal_code, "04538132");
        assert_eq!(account.phone, "11987654321");
        assert_eq!(account.document, "12345678901");
    }

    #[test]
    fn test_submit_blocked_by_password_mismatch() {
        let mut wizard = wizard_at_security();
        wizard.set_field(Field::Password, "abcdef");
        wizard.set_field(Field::ConfirmPassword, "abcdeg");

        let gateway = RecordingGateway::new();
        let err = wizard.submit(&gateway).unwrap_err();
        match err {
            SubmitError::Invalid { problems } => {
                assert!(problems.iter().any(|p| p.field == Field::ConfirmPassword));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(gateway.call_count(), 0);
        assert_eq!(wizard.section(), Section::Security);
    }

    #[test]
    fn test_submit_blocked_by_short_password() {
        let mut wizard = wizard_at_security();
        wizard.set_field(Field::Password, "abc");
        wizard.set_field(Field::ConfirmPassword, "abc");

        let gateway = RecordingGateway::new();
        assert!(matches!(
            wizard.submit(&gateway).unwrap_err(),
            SubmitError::Invalid { .. }
        ));
        assert_eq!(gateway.call_count(), 0);
    }

    #[test]
    fn test_submit_not_reachable_outside_security() {
        let mut wizard = RegistrationWizard::new("BR");
        let gateway = RecordingGateway::new();
        assert!(matches!(wizard.submit(&gateway).unwrap_err(), SubmitError::NotReady));
        assert_eq!(gateway.call_count(), 0);
    }

    #[test]
    fn test_submit_rejection_preserves_draft_for_retry() {
        let mut wizard = wizard_at_security();
        wizard.set_field(Field::Password, "abcdef");
        wizard.set_field(Field::ConfirmPassword, "abcdef");

        let gateway = RecordingGateway::rejecting();
        let err = wizard.submit(&gateway).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(_)));
        assert_eq!(wizard.section(), Section::Security);
        assert_eq!(wizard.draft().email, "jo@example.com");

        // Retry against a working gateway succeeds with the same draft
        let retry = RecordingGateway::new();
        wizard.submit(&retry).unwrap();
        assert_eq!(retry.call_count(), 1);
    }
}
