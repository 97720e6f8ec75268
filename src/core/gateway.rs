//! Account gateway collaborator
//!
//! Account creation and login are delegated through the [`AccountGateway`]
//! trait; the REST client behind it is out of scope here. The bundled
//! [`DemoGateway`] issues local sessions so the CLI can be exercised
//! end-to-end without a backend.

use chrono::Utc;
use thiserror::Error;
use ulid::Ulid;

use crate::core::session::AuthSession;
use crate::onboarding::draft::NewAccount;

/// A gateway failure. Rejections carry the message surfaced to the user;
/// the wizard leaves the draft untouched so the submit can be retried.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Rejected(String),
}

/// Contract for the account-creation backend.
pub trait AccountGateway {
    /// Create an account from a canonical registration payload.
    fn register(&self, account: &NewAccount) -> Result<AuthSession, GatewayError>;

    /// Authenticate an existing user.
    fn login(&self, email: &str, password: &str) -> Result<AuthSession, GatewayError>;
}

/// Offline gateway issuing ULID-backed demo sessions.
#[derive(Debug, Default)]
pub struct DemoGateway;

impl DemoGateway {
    fn issue(name: &str, email: &str) -> AuthSession {
        AuthSession {
            token: format!("demo-{}", Ulid::new()),
            user_id: Ulid::new().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            created: Utc::now(),
        }
    }
}

impl AccountGateway for DemoGateway {
    fn register(&self, account: &NewAccount) -> Result<AuthSession, GatewayError> {
        if account.email.trim().is_empty() || !account.email.contains('@') {
            return Err(GatewayError::Rejected("Invalid email address".to_string()));
        }
        Ok(Self::issue(&account.name, &account.email))
    }

    fn login(&self, email: &str, password: &str) -> Result<AuthSession, GatewayError> {
        if !email.contains('@') || password.chars().count() < 6 {
            return Err(GatewayError::Rejected("Invalid credentials".to_string()));
        }
        let name = email.split('@').next().unwrap_or(email).to_string();
        Ok(Self::issue(&name, email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_login_issues_session() {
        let session = DemoGateway.login("jo@example.com", "abcdef").unwrap();
        assert!(session.token.starts_with("demo-"));
        assert_eq!(session.email, "jo@example.com");
        assert_eq!(session.name, "jo");
    }

    #[test]
    fn test_demo_login_rejects_short_password() {
        assert!(DemoGateway.login("jo@example.com", "abc").is_err());
    }

    #[test]
    fn test_demo_register_rejects_bad_email() {
        let account = NewAccount {
            name: "Jo".to_string(),
            email: "nope".to_string(),
            password: "abcdef".to_string(),
            country: "BR".to_string(),
            postal_code: "01310100".to_string(),
            street: "Avenida Paulista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            phone: "11987654321".to_string(),
            document: "12345678901".to_string(),
            birth_date: "1990-04-12".to_string(),
        };
        assert!(DemoGateway.register(&account).is_err());
    }
}
