//! `carteira countries` command - list supported country profiles

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::onboarding::country::COUNTRIES;

#[derive(clap::Args, Debug)]
pub struct CountriesArgs {}

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Country")]
    name: &'static str,
    #[tabled(rename = "Postal Code")]
    postal: String,
    #[tabled(rename = "Document")]
    document: String,
    #[tabled(rename = "State")]
    state: &'static str,
}

#[derive(Serialize)]
struct CountryJson {
    code: &'static str,
    name: &'static str,
    postal_code_label: &'static str,
    postal_code_length: String,
    document_label: &'static str,
    document_length: String,
    has_states: bool,
}

pub fn run(_args: CountriesArgs, global: &GlobalOpts) -> Result<()> {
    if global.format == OutputFormat::Json {
        let entries: Vec<CountryJson> = COUNTRIES
            .iter()
            .map(|p| CountryJson {
                code: p.code,
                name: p.name,
                postal_code_label: p.postal_code_label,
                postal_code_length: p.postal_rule.to_string(),
                document_label: p.document_label,
                document_length: p.document_rule.to_string(),
                has_states: p.has_states,
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).into_diagnostic()?
        );
        return Ok(());
    }

    let rows: Vec<CountryRow> = COUNTRIES
        .iter()
        .map(|p| CountryRow {
            code: p.code,
            name: p.name,
            postal: format!("{} ({})", p.postal_code_label, p.postal_rule),
            document: format!("{} ({})", p.document_label, p.document_rule),
            state: if p.has_states { "required" } else { "-" },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    if !global.quiet {
        println!("{} country profile(s)", COUNTRIES.len());
    }
    Ok(())
}
