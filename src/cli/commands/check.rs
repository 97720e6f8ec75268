//! `carteira check` command - format and validate one field value

use clap::ValueEnum;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::onboarding::country;
use crate::onboarding::format::{format_field, MaskedField};
use crate::onboarding::validate::validate_field;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CheckField {
    PostalCode,
    Document,
    Phone,
}

impl From<CheckField> for MaskedField {
    fn from(field: CheckField) -> Self {
        match field {
            CheckField::PostalCode => MaskedField::PostalCode,
            CheckField::Document => MaskedField::Document,
            CheckField::Phone => MaskedField::Phone,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// The raw value to check
    pub value: String,

    /// Which field the value belongs to
    #[arg(long, short = 'F', value_enum)]
    pub field: CheckField,

    /// ISO country code
    #[arg(long, short = 'c', default_value = "BR")]
    pub country: String,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let field: MaskedField = args.field.into();
    let profile = country::lookup(&args.country);
    let formatted = format_field(&args.value, field, &args.country);
    let valid = validate_field(&args.value, field, &args.country);

    let label = match field {
        MaskedField::PostalCode => profile.postal_code_label,
        MaskedField::Document => profile.document_label,
        MaskedField::Phone => "Phone",
    };

    if !global.quiet {
        println!("{}", formatted);
    }
    if valid {
        if !global.quiet {
            println!("{} valid {} for {}", style("✓").green(), label, profile.name);
        }
        Ok(())
    } else {
        Err(miette::miette!(
            "invalid {} for {}: expected {} digits",
            label,
            profile.name,
            match field {
                MaskedField::PostalCode => profile.postal_rule,
                MaskedField::Document => profile.document_rule,
                MaskedField::Phone => profile.phone_rule,
            }
        ))
    }
}
