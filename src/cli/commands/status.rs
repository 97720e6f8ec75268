//! `carteira status` command - show the current session

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::mask_secret;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::session::SessionStore;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let store = SessionStore::open().into_diagnostic()?;
    let session = store.load();

    if global.format == OutputFormat::Json {
        match session {
            Some(session) => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&session).into_diagnostic()?
                );
            }
            None => println!("null"),
        }
        return Ok(());
    }

    match session {
        Some(session) => {
            println!(
                "{} Logged in as {} <{}>",
                style("✓").green(),
                style(&session.name).bold(),
                session.email
            );
            println!("  user:    {}", session.user_id);
            println!("  token:   {}", mask_secret(&session.token));
            println!("  since:   {}", session.created.format("%Y-%m-%d %H:%M UTC"));
        }
        None => {
            println!("Not logged in");
        }
    }
    Ok(())
}
