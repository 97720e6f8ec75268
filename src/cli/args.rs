//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    check::CheckArgs,
    completions::CompletionsArgs,
    countries::CountriesArgs,
    login::LoginArgs,
    register::RegisterArgs,
    status::StatusArgs,
};

#[derive(Parser)]
#[command(name = "carteira")]
#[command(author, version, about = "Carteira wallet onboarding")]
#[command(
    long_about = "Digital wallet account onboarding: a country-aware registration wizard, field formatting and validation, and local session management."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a wallet account through the registration wizard
    Register(RegisterArgs),

    /// Log in to an existing account
    Login(LoginArgs),

    /// Log out and clear the stored session
    Logout,

    /// Show the current session
    Status(StatusArgs),

    /// List supported country profiles
    Countries(CountriesArgs),

    /// Format and validate a single field value
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for informational commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table output
    #[default]
    Auto,
    /// JSON format (for programming)
    Json,
}
