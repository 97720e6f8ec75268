//! `carteira login` command - authenticate and store a session

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::gateway::{AccountGateway, DemoGateway};
use crate::core::session::SessionStore;

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

pub fn run(args: LoginArgs, global: &GlobalOpts) -> Result<()> {
    let theme = ColorfulTheme::default();

    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()
            .into_diagnostic()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()
            .into_diagnostic()?,
    };

    let session = DemoGateway
        .login(&email, &password)
        .map_err(|e| miette::miette!("{}", e))?;

    let store = SessionStore::open().into_diagnostic()?;
    store.save(&session).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Logged in as {}",
            style("✓").green(),
            style(&session.email).cyan()
        );
    }
    Ok(())
}
