//! CLI command implementations

pub mod check;
pub mod completions;
pub mod countries;
pub mod login;
pub mod logout;
pub mod register;
pub mod status;
