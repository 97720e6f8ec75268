//! `carteira register` command - account creation wizard
//!
//! Drives the three-section registration state machine. Every field can be
//! supplied by flag; missing fields are collected interactively with
//! dialoguer prompts. `--no-input` fails instead of prompting, for scripts
//! and tests.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::core::directory::{PostalDirectory, StaticDirectory};
use crate::core::gateway::{AccountGateway, DemoGateway};
use crate::core::session::SessionStore;
use crate::onboarding::country::{self, COUNTRIES};
use crate::onboarding::draft::Field;
use crate::onboarding::wizard::{run_lookup, FieldProblem, RegistrationWizard, Section, SubmitError};

#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: Option<String>,

    /// National document (CPF, SSN, NINO, ...)
    #[arg(long)]
    pub document: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// ISO country code (default from config, BR out of the box)
    #[arg(long)]
    pub country: Option<String>,

    /// Postal code (CEP, ZIP, postcode, ...)
    #[arg(long)]
    pub postal_code: Option<String>,

    /// Street address
    #[arg(long)]
    pub street: Option<String>,

    /// City
    #[arg(long)]
    pub city: Option<String>,

    /// State or province (required for countries that collect one)
    #[arg(long)]
    pub state: Option<String>,

    /// Password (minimum 6 characters)
    #[arg(long)]
    pub password: Option<String>,

    /// Password confirmation (defaults to --password when omitted)
    #[arg(long)]
    pub confirm_password: Option<String>,

    /// Fail on missing fields instead of prompting
    #[arg(long)]
    pub no_input: bool,
}

pub fn run(args: RegisterArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let country_code = args
        .country
        .clone()
        .unwrap_or_else(|| config.default_country());
    let mut wizard = RegistrationWizard::new(&country_code);

    let confirm = args
        .confirm_password
        .clone()
        .or_else(|| args.password.clone());
    let flags: [(Field, &Option<String>); 12] = [
        (Field::Name, &args.name),
        (Field::Email, &args.email),
        (Field::BirthDate, &args.birth_date),
        (Field::Document, &args.document),
        (Field::Phone, &args.phone),
        (Field::Country, &args.country),
        (Field::PostalCode, &args.postal_code),
        (Field::Street, &args.street),
        (Field::City, &args.city),
        (Field::State, &args.state),
        (Field::Password, &args.password),
        (Field::ConfirmPassword, &confirm),
    ];
    for (field, value) in flags {
        if let Some(v) = value {
            wizard.set_field(field, v);
        }
    }

    let directory = StaticDirectory;
    let gateway = DemoGateway;

    let session = if args.no_input {
        run_noninteractive(&mut wizard, &directory, &gateway)?
    } else {
        run_interactive(&mut wizard, &directory, &gateway)?
    };

    let store = SessionStore::open().into_diagnostic()?;
    store.save(&session).into_diagnostic()?;

    if !global.quiet {
        println!();
        println!(
            "{} Account created for {}",
            style("✓").green(),
            style(&session.email).cyan()
        );
        println!("  Signed in as {}", style(&session.name).bold());
    }
    Ok(())
}

/// Drive the wizard straight through with the flag-provided values.
fn run_noninteractive(
    wizard: &mut RegistrationWizard,
    directory: &dyn PostalDirectory,
    gateway: &dyn AccountGateway,
) -> Result<crate::core::session::AuthSession> {
    wizard.advance().map_err(|e| problems_report(e.section, &e.problems))?;
    search_postal_code(wizard, directory, true);
    wizard.advance().map_err(|e| problems_report(e.section, &e.problems))?;

    wizard.submit(gateway).map_err(|e| match e {
        SubmitError::Invalid { ref problems } => problems_report(Section::Security, problems),
        other => miette::miette!("{}", other),
    })
}

/// Walk the sections interactively until the account is created.
fn run_interactive(
    wizard: &mut RegistrationWizard,
    directory: &dyn PostalDirectory,
    gateway: &dyn AccountGateway,
) -> Result<crate::core::session::AuthSession> {
    let theme = ColorfulTheme::default();

    println!();
    println!("{} Create your wallet account", style("◆").cyan());
    println!("{}", style("─".repeat(50)).dim());

    loop {
        banner(wizard.section());
        match wizard.section() {
            Section::Personal => {
                prompt_personal(&theme, wizard)?;
                if let Err(e) = wizard.advance() {
                    print_problems(&e.problems);
                }
            }
            Section::Address => {
                prompt_address(&theme, wizard, directory)?;
                let nav = Select::with_theme(&theme)
                    .with_prompt("Next")
                    .items(&["Continue", "Back"])
                    .default(0)
                    .interact()
                    .into_diagnostic()?;
                if nav == 1 {
                    wizard.back();
                    continue;
                }
                if let Err(e) = wizard.advance() {
                    print_problems(&e.problems);
                }
            }
            Section::Security => {
                prompt_security(&theme, wizard)?;
                let nav = Select::with_theme(&theme)
                    .with_prompt("Next")
                    .items(&["Create account", "Back"])
                    .default(0)
                    .interact()
                    .into_diagnostic()?;
                if nav == 1 {
                    wizard.back();
                    continue;
                }
                match wizard.submit(gateway) {
                    Ok(session) => return Ok(session),
                    Err(SubmitError::Rejected(message)) => {
                        // Draft preserved: the user may retry from here.
                        println!("{} {}", style("⚠").red(), style(message).red());
                    }
                    Err(SubmitError::Invalid { problems }) => print_problems(&problems),
                    Err(SubmitError::NotReady) => unreachable!("submit from security section"),
                }
            }
        }
    }
}

fn banner(section: Section) {
    println!();
    println!("{} {}", style("◆").cyan(), style(section.title()).bold());
    println!();
}

fn prompt_personal(theme: &ColorfulTheme, wizard: &mut RegistrationWizard) -> Result<()> {
    prompt_field(theme, wizard, Field::Name, "Full name", false)?;
    prompt_field(theme, wizard, Field::Email, "Email", false)?;
    prompt_field(theme, wizard, Field::BirthDate, "Birth date (YYYY-MM-DD)", false)?;

    let profile = country::lookup(&wizard.draft().country);
    prompt_field(theme, wizard, Field::Document, profile.document_label, false)?;
    prompt_field(theme, wizard, Field::Phone, "Phone", false)?;
    Ok(())
}

fn prompt_address(
    theme: &ColorfulTheme,
    wizard: &mut RegistrationWizard,
    directory: &dyn PostalDirectory,
) -> Result<()> {
    prompt_country(theme, wizard)?;

    let profile = country::lookup(&wizard.draft().country);
    prompt_field(theme, wizard, Field::PostalCode, profile.postal_code_label, false)?;
    search_postal_code(wizard, directory, false);

    prompt_field(theme, wizard, Field::Street, "Street", false)?;
    prompt_field(theme, wizard, Field::City, "City", false)?;
    if let Some(label) = profile.state_label {
        prompt_field(theme, wizard, Field::State, label, !profile.has_states)?;
    }
    Ok(())
}

fn prompt_security(theme: &ColorfulTheme, wizard: &mut RegistrationWizard) -> Result<()> {
    loop {
        let password = Password::with_theme(theme)
            .with_prompt("Password")
            .interact()
            .into_diagnostic()?;
        wizard.set_field(Field::Password, &password);
        let result = wizard.validation(Field::Password);
        if result.valid {
            break;
        }
        print_invalid(&result.message);
    }
    loop {
        let confirm = Password::with_theme(theme)
            .with_prompt("Confirm password")
            .interact()
            .into_diagnostic()?;
        wizard.set_field(Field::ConfirmPassword, &confirm);
        let result = wizard.validation(Field::ConfirmPassword);
        if result.valid {
            break;
        }
        print_invalid(&result.message);
    }
    Ok(())
}

/// Prompt one field until it validates. The stored (formatted) value is
/// offered back as the editable default.
fn prompt_field(
    theme: &ColorfulTheme,
    wizard: &mut RegistrationWizard,
    field: Field,
    label: &str,
    allow_empty: bool,
) -> Result<()> {
    loop {
        let current = wizard.draft().get(field).to_string();
        let mut input = Input::<String>::with_theme(theme)
            .with_prompt(label)
            .allow_empty(allow_empty);
        if !current.is_empty() {
            input = input.default(current);
        }
        let value = input.interact_text().into_diagnostic()?;
        wizard.set_field(field, &value);

        let result = wizard.validation(field);
        if result.valid {
            if field.mask().is_some() {
                println!("  {}", style(wizard.draft().get(field)).dim());
            }
            return Ok(());
        }
        print_invalid(&result.message);
    }
}

fn prompt_country(theme: &ColorfulTheme, wizard: &mut RegistrationWizard) -> Result<()> {
    let names: Vec<&str> = COUNTRIES.iter().map(|p| p.name).collect();
    let current = COUNTRIES
        .iter()
        .position(|p| p.code.eq_ignore_ascii_case(&wizard.draft().country))
        .unwrap_or(0);
    let selection = Select::with_theme(theme)
        .with_prompt("Country")
        .items(&names)
        .default(current)
        .interact()
        .into_diagnostic()?;
    let code = COUNTRIES[selection].code.to_string();
    wizard.set_field(Field::Country, &code);
    Ok(())
}

/// Fire the postal auto-fill when the wizard says one is due. Lookup
/// failures degrade silently into "no data"; only a successful fill is
/// announced.
fn search_postal_code(
    wizard: &mut RegistrationWizard,
    directory: &dyn PostalDirectory,
    quiet: bool,
) {
    if !run_lookup(wizard, directory) {
        return;
    }
    if !quiet && !wizard.draft().street.is_empty() {
        println!(
            "  {} {}, {} - {}",
            style("✓").green(),
            wizard.draft().street,
            wizard.draft().city,
            wizard.draft().state
        );
    }
}

fn print_invalid(message: &Option<String>) {
    let text = message.as_deref().unwrap_or("Invalid value");
    println!("  {} {}", style("✗").red(), style(text).red());
}

fn print_problems(problems: &[FieldProblem]) {
    println!();
    for problem in problems {
        println!(
            "  {} {}: {}",
            style("✗").red(),
            problem.field,
            style(&problem.message).red()
        );
    }
}

fn problems_report(section: Section, problems: &[FieldProblem]) -> miette::Report {
    let details: Vec<String> = problems
        .iter()
        .map(|p| format!("{}: {}", p.field, p.message))
        .collect();
    miette::miette!(
        "{} section incomplete: {}",
        section.title(),
        details.join("; ")
    )
}
