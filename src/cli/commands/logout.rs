//! `carteira logout` command - clear the stored session

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::session::SessionStore;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let store = SessionStore::open().into_diagnostic()?;
    let had_session = store.load().is_some();
    store.clear().into_diagnostic()?;

    if !global.quiet {
        if had_session {
            println!("{} Logged out", style("✓").green());
        } else {
            println!("Not logged in");
        }
    }
    Ok(())
}
