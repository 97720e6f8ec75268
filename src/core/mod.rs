//! Core module - configuration, session storage, and collaborator contracts

pub mod config;
pub mod directory;
pub mod gateway;
pub mod session;

pub use config::Config;
pub use directory::{DirectoryError, PostalAddress, PostalDirectory, StaticDirectory};
pub use gateway::{AccountGateway, DemoGateway, GatewayError};
pub use session::{AuthSession, SessionError, SessionStore};
