//! Postal lookup collaborator
//!
//! The wizard auto-fills Brazilian addresses from an 8-digit CEP through the
//! [`PostalDirectory`] trait. The bundled [`StaticDirectory`] carries the
//! known demo addresses so the tool works fully offline; a networked
//! directory would implement the same trait.

use thiserror::Error;

/// A structured address returned by a postal lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Errors from a postal directory backend. The wizard treats any error the
/// same as "not found": fields stay untouched and nothing is surfaced.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("postal directory unavailable: {0}")]
    Unavailable(String),
}

/// Lookup contract: defined for canonical 8-digit Brazilian CEPs.
/// `Ok(None)` means the code is well-formed but unknown.
pub trait PostalDirectory {
    fn search(&self, code: &str) -> Result<Option<PostalAddress>, DirectoryError>;
}

/// The built-in demo directory.
#[derive(Debug, Default)]
pub struct StaticDirectory;

const KNOWN_ADDRESSES: &[(&str, &str, &str, &str, &str)] = &[
    ("01310100", "Avenida Paulista", "São Paulo", "SP", "01310-100"),
    ("20040020", "Praça Mauá", "Rio de Janeiro", "RJ", "20040-020"),
    ("30130100", "Avenida Afonso Pena", "Belo Horizonte", "MG", "30130-100"),
];

impl PostalDirectory for StaticDirectory {
    fn search(&self, code: &str) -> Result<Option<PostalAddress>, DirectoryError> {
        let clean: String = code.chars().filter(|c| c.is_ascii_digit()).collect();
        if clean.len() != 8 {
            return Ok(None);
        }
        Ok(KNOWN_ADDRESSES
            .iter()
            .find(|(cep, ..)| *cep == clean)
            .map(|(_, street, city, state, postal_code)| PostalAddress {
                street: (*street).to_string(),
                city: (*city).to_string(),
                state: (*state).to_string(),
                postal_code: (*postal_code).to_string(),
            }))
    }
}
