//! Country profile table
//!
//! Every country-specific behavior in onboarding (labels, masks, length
//! rules, whether a state/province is collected) lives in this table.
//! Adding a country means adding a row, not a code branch.

use std::fmt;

/// How a national document is canonicalized.
///
/// Most documents are digit-only (CPF, SSN, NIF). A few carry letters
/// (NINO, codice fiscale, RUT check digit) and are kept as uppercase
/// alphanumerics instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Numeric,
    Alphanumeric,
}

/// Length rule for a canonicalized field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    /// Exactly this many characters
    Exactly(usize),
    /// Any of the listed lengths
    OneOf(&'static [usize]),
    /// Inclusive range
    Between(usize, usize),
    /// This many characters or more
    AtLeast(usize),
}

impl LengthRule {
    /// Check a canonical length against the rule
    pub fn accepts(&self, len: usize) -> bool {
        match *self {
            LengthRule::Exactly(n) => len == n,
            LengthRule::OneOf(ns) => ns.contains(&len),
            LengthRule::Between(min, max) => len >= min && len <= max,
            LengthRule::AtLeast(n) => len >= n,
        }
    }
}

impl fmt::Display for LengthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LengthRule::Exactly(n) => write!(f, "{}", n),
            LengthRule::OneOf(ns) => {
                let parts: Vec<String> = ns.iter().map(|n| n.to_string()).collect();
                write!(f, "{}", parts.join(" or "))
            }
            LengthRule::Between(min, max) => write!(f, "{}-{}", min, max),
            LengthRule::AtLeast(n) => write!(f, "{}+", n),
        }
    }
}

/// One piece of a display mask: a run of input characters or a literal
/// separator re-inserted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPiece {
    Sep(&'static str),
    Group(usize),
    /// A run of min..=max characters, sized so the fixed groups after it
    /// stay full. GB postcodes use this: 5 digits render "12 345",
    /// 6 render "123 456".
    Flex(usize, usize),
}

/// A display mask: separators at fixed character-count offsets.
/// An empty mask means canonical passthrough.
pub type Mask = &'static [MaskPiece];

use MaskPiece::{Flex, Group, Sep};

/// Formatting and validation profile for one supported country.
#[derive(Debug, Clone, Copy)]
pub struct CountryProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub postal_code_label: &'static str,
    pub document_label: &'static str,
    pub state_label: Option<&'static str>,
    pub has_states: bool,
    pub document_kind: DocumentKind,
    pub postal_rule: LengthRule,
    pub document_rule: LengthRule,
    pub phone_rule: LengthRule,
    pub postal_mask: Mask,
    pub document_mask: Mask,
    pub phone_mask: Mask,
}

/// Fallback profile for unrecognized country codes.
pub const GENERIC: CountryProfile = CountryProfile {
    code: "",
    name: "Other",
    postal_code_label: "Postal Code",
    document_label: "Document",
    state_label: None,
    has_states: false,
    document_kind: DocumentKind::Numeric,
    postal_rule: LengthRule::AtLeast(4),
    document_rule: LengthRule::AtLeast(5),
    phone_rule: LengthRule::AtLeast(8),
    postal_mask: &[],
    document_mask: &[],
    phone_mask: &[],
};

/// All supported country profiles, in selector order.
pub const COUNTRIES: &[CountryProfile] = &[
    CountryProfile {
        code: "BR",
        name: "Brasil",
        postal_code_label: "CEP",
        document_label: "CPF",
        state_label: Some("Estado"),
        has_states: true,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::Exactly(8),
        document_rule: LengthRule::Exactly(11),
        phone_rule: LengthRule::OneOf(&[10, 11]),
        postal_mask: &[Group(5), Sep("-"), Group(3)],
        document_mask: &[Group(3), Sep("."), Group(3), Sep("."), Group(3), Sep("-"), Group(2)],
        phone_mask: &[Sep("("), Group(2), Sep(") "), Group(5), Sep("-"), Group(4)],
    },
    CountryProfile {
        code: "US",
        name: "United States",
        postal_code_label: "ZIP Code",
        document_label: "SSN",
        state_label: Some("State"),
        has_states: true,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::OneOf(&[5, 9]),
        document_rule: LengthRule::Exactly(9),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[Group(5), Sep("-"), Group(4)],
        document_mask: &[Group(3), Sep("-"), Group(2), Sep("-"), Group(4)],
        phone_mask: &[Sep("("), Group(3), Sep(") "), Group(3), Sep("-"), Group(4)],
    },
    CountryProfile {
        code: "GB",
        name: "United Kingdom",
        postal_code_label: "Postcode",
        document_label: "NINO",
        state_label: Some("County"),
        has_states: false,
        document_kind: DocumentKind::Alphanumeric,
        postal_rule: LengthRule::Between(5, 7),
        document_rule: LengthRule::Between(8, 9),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[Flex(2, 3), Sep(" "), Group(3)],
        document_mask: &[],
        phone_mask: &[Group(4), Sep(" "), Group(3), Sep(" "), Group(3)],
    },
    CountryProfile {
        code: "IE",
        name: "Ireland",
        postal_code_label: "Eircode",
        document_label: "PPS Number",
        state_label: Some("County"),
        has_states: false,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::Exactly(7),
        document_rule: LengthRule::AtLeast(7),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[Group(3), Sep(" "), Group(4)],
        document_mask: &[],
        phone_mask: &[Group(3), Sep(" "), Group(3), Sep(" "), Group(4)],
    },
    CountryProfile {
        code: "PT",
        name: "Portugal",
        postal_code_label: "Código Postal",
        document_label: "NIF",
        state_label: Some("Distrito"),
        has_states: false,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::OneOf(&[7, 8]),
        document_rule: LengthRule::Exactly(9),
        phone_rule: LengthRule::Exactly(9),
        postal_mask: &[Group(4), Sep("-"), Group(3)],
        document_mask: &[Group(3), Sep(" "), Group(3), Sep(" "), Group(3)],
        phone_mask: &[Group(3), Sep(" "), Group(3), Sep(" "), Group(3)],
    },
    CountryProfile {
        code: "ES",
        name: "España",
        postal_code_label: "Código Postal",
        document_label: "NIF",
        state_label: Some("Provincia"),
        has_states: false,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::Exactly(5),
        document_rule: LengthRule::Exactly(9),
        phone_rule: LengthRule::Exactly(9),
        postal_mask: &[],
        document_mask: &[Group(1), Sep("."), Group(8)],
        phone_mask: &[Group(3), Sep(" "), Group(3), Sep(" "), Group(3)],
    },
    CountryProfile {
        code: "FR",
        name: "France",
        postal_code_label: "Code Postal",
        document_label: "Numéro Fiscal",
        state_label: Some("Région"),
        has_states: false,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::Exactly(5),
        document_rule: LengthRule::Exactly(13),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[],
        document_mask: &[
            Group(1), Sep(" "), Group(2), Sep(" "), Group(2), Sep(" "),
            Group(2), Sep(" "), Group(3), Sep(" "), Group(3),
        ],
        phone_mask: &[
            Group(2), Sep(" "), Group(2), Sep(" "), Group(2), Sep(" "),
            Group(2), Sep(" "), Group(2),
        ],
    },
    CountryProfile {
        code: "DE",
        name: "Deutschland",
        postal_code_label: "Postleitzahl",
        document_label: "Steuer-ID",
        state_label: Some("Bundesland"),
        has_states: false,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::Exactly(5),
        document_rule: LengthRule::Exactly(11),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[],
        document_mask: &[Group(2), Sep(" "), Group(3), Sep(" "), Group(3), Sep(" "), Group(3)],
        phone_mask: &[Group(3), Sep(" "), Group(3), Sep(" "), Group(4)],
    },
    CountryProfile {
        code: "IT",
        name: "Italia",
        postal_code_label: "CAP",
        document_label: "Codice Fiscale",
        state_label: Some("Regione"),
        has_states: false,
        document_kind: DocumentKind::Alphanumeric,
        postal_rule: LengthRule::Exactly(5),
        document_rule: LengthRule::Exactly(16),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[],
        document_mask: &[],
        phone_mask: &[Group(3), Sep(" "), Group(3), Sep(" "), Group(4)],
    },
    CountryProfile {
        code: "CA",
        name: "Canada",
        postal_code_label: "Postal Code",
        document_label: "SIN",
        state_label: Some("Province"),
        has_states: true,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::Exactly(6),
        document_rule: LengthRule::Exactly(9),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[Group(3), Sep(" "), Group(3)],
        document_mask: &[Group(3), Sep(" "), Group(3), Sep(" "), Group(3)],
        phone_mask: &[Sep("("), Group(3), Sep(") "), Group(3), Sep("-"), Group(4)],
    },
    CountryProfile {
        code: "AU",
        name: "Australia",
        postal_code_label: "Postcode",
        document_label: "TFN",
        state_label: Some("State"),
        has_states: true,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::Exactly(4),
        document_rule: LengthRule::Exactly(9),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[],
        document_mask: &[Group(3), Sep(" "), Group(3), Sep(" "), Group(3)],
        phone_mask: &[Group(2), Sep(" "), Group(4), Sep(" "), Group(4)],
    },
    CountryProfile {
        code: "MX",
        name: "México",
        postal_code_label: "Código Postal",
        document_label: "RFC",
        state_label: Some("Estado"),
        has_states: true,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::Exactly(5),
        document_rule: LengthRule::Between(10, 13),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[],
        document_mask: &[],
        phone_mask: &[Group(2), Sep(" "), Group(4), Sep(" "), Group(4)],
    },
    CountryProfile {
        code: "AR",
        name: "Argentina",
        postal_code_label: "Código Postal",
        document_label: "CUIL",
        state_label: Some("Provincia"),
        has_states: true,
        document_kind: DocumentKind::Numeric,
        postal_rule: LengthRule::OneOf(&[4, 8]),
        document_rule: LengthRule::Exactly(11),
        phone_rule: LengthRule::Exactly(10),
        postal_mask: &[],
        document_mask: &[Group(2), Sep("-"), Group(8), Sep("-"), Group(1)],
        phone_mask: &[Group(2), Sep(" "), Group(4), Sep(" "), Group(4)],
    },
    CountryProfile {
        code: "CL",
        name: "Chile",
        postal_code_label: "Código Postal",
        document_label: "RUT",
        state_label: Some("Región"),
        has_states: false,
        document_kind: DocumentKind::Alphanumeric,
        postal_rule: LengthRule::Exactly(7),
        document_rule: LengthRule::OneOf(&[9, 10]),
        phone_rule: LengthRule::Exactly(9),
        postal_mask: &[Group(3), Sep("."), Group(4)],
        document_mask: &[Group(2), Sep("."), Group(3), Sep("."), Group(3), Sep("-"), Group(1)],
        phone_mask: &[Group(1), Sep(" "), Group(4), Sep(" "), Group(4)],
    },
];

/// Look up the profile for a country code. Total: unrecognized codes
/// (including empty strings) get the generic fallback profile.
pub fn lookup(code: &str) -> &'static CountryProfile {
    COUNTRIES
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(code.trim()))
        .unwrap_or(&GENERIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_codes() {
        assert_eq!(lookup("BR").document_label, "CPF");
        assert_eq!(lookup("br").document_label, "CPF");
        assert_eq!(lookup("US").postal_code_label, "ZIP Code");
        assert_eq!(lookup("IT").document_kind, DocumentKind::Alphanumeric);
    }

    #[test]
    fn test_lookup_unknown_falls_back() {
        let p = lookup("ZZ");
        assert_eq!(p.document_label, "Document");
        assert_eq!(p.postal_code_label, "Postal Code");
        assert!(!p.has_states);
        assert!(p.postal_rule.accepts(4));
        assert!(!p.postal_rule.accepts(3));
    }

    #[test]
    fn test_lookup_empty_code() {
        assert_eq!(lookup("").name, "Other");
        assert_eq!(lookup("  ").name, "Other");
    }

    #[test]
    fn test_one_profile_per_code() {
        for (i, a) in COUNTRIES.iter().enumerate() {
            for b in &COUNTRIES[i + 1..] {
                assert_ne!(a.code, b.code, "duplicate profile for {}", a.code);
            }
        }
    }

    #[test]
    fn test_state_label_present_when_required() {
        for p in COUNTRIES {
            if p.has_states {
                assert!(p.state_label.is_some(), "{} requires a state label", p.code);
            }
        }
    }

    #[test]
    fn test_length_rules() {
        assert!(LengthRule::Exactly(8).accepts(8));
        assert!(!LengthRule::Exactly(8).accepts(7));
        assert!(LengthRule::OneOf(&[5, 9]).accepts(9));
        assert!(!LengthRule::OneOf(&[5, 9]).accepts(7));
        assert!(LengthRule::Between(5, 7).accepts(5));
        assert!(LengthRule::Between(5, 7).accepts(7));
        assert!(!LengthRule::Between(5, 7).accepts(8));
        assert!(LengthRule::AtLeast(4).accepts(12));
        assert!(!LengthRule::AtLeast(4).accepts(3));
    }
}
