//! Display formatting for masked fields
//!
//! Raw keystrokes are reduced to a canonical form (digits, or uppercase
//! alphanumerics for lettered document types) and separators are re-inserted
//! from the country profile's mask. Formatting runs on every change, so it
//! must be idempotent: feeding a formatted value back in yields the same
//! string.

use crate::onboarding::country::{self, CountryProfile, DocumentKind, Mask, MaskPiece};

/// The three fields that carry a country-specific display mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskedField {
    PostalCode,
    Document,
    Phone,
}

impl MaskedField {
    pub fn all() -> &'static [MaskedField] {
        &[MaskedField::PostalCode, MaskedField::Document, MaskedField::Phone]
    }
}

/// Reduce a raw value to its canonical form for the given field.
///
/// Postal codes and phones are digit-only everywhere. Documents follow the
/// profile's kind: digit-only, or uppercase alphanumerics where the document
/// format carries letters.
pub fn canonical(raw: &str, field: MaskedField, profile: &CountryProfile) -> String {
    let alpha = field == MaskedField::Document && profile.document_kind == DocumentKind::Alphanumeric;
    if alpha {
        raw.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect()
    } else {
        raw.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

/// Format a raw value for display, given its field and country.
///
/// Never fails; unknown countries fall back to the generic profile, whose
/// empty masks make this a canonical passthrough.
pub fn format_field(raw: &str, field: MaskedField, country_code: &str) -> String {
    let profile = country::lookup(country_code);
    let clean = canonical(raw, field, profile);
    let mask = match field {
        MaskedField::PostalCode => profile.postal_mask,
        MaskedField::Document => profile.document_mask,
        MaskedField::Phone => profile.phone_mask,
    };
    apply_mask(&clean, mask)
}

/// Walk the mask, emitting separators only when input characters remain.
/// Flexible groups shrink to keep the fixed groups after them full.
/// Characters beyond the mask's capacity are appended unformatted.
fn apply_mask(clean: &str, mask: Mask) -> String {
    if mask.is_empty() {
        return clean.to_string();
    }

    let mut out = String::with_capacity(clean.len() + mask.len());
    let mut rest = clean;
    for (i, piece) in mask.iter().enumerate() {
        if rest.is_empty() {
            break;
        }
        match *piece {
            MaskPiece::Sep(s) => out.push_str(s),
            MaskPiece::Group(n) => {
                let take = n.min(rest.len());
                out.push_str(&rest[..take]);
                rest = &rest[take..];
            }
            MaskPiece::Flex(min, max) => {
                let tail: usize = mask[i + 1..]
                    .iter()
                    .map(|p| match p {
                        MaskPiece::Group(n) => *n,
                        _ => 0,
                    })
                    .sum();
                let take = rest.len().saturating_sub(tail).clamp(min, max).min(rest.len());
                out.push_str(&rest[..take]);
                rest = &rest[take..];
            }
        }
    }
    out.push_str(rest);
    out
}
