//! Carteira: digital wallet onboarding toolkit
//!
//! The account-registration core of the Carteira wallet client: a
//! country-profile-driven formatting and validation engine, a sectioned
//! registration wizard, and session storage, exposed through a CLI.

pub mod cli;
pub mod core;
pub mod onboarding;
