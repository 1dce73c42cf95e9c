use crate::commands::{load_contacts, print_json, Context};
use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tidybook_sync::export_contacts_csv;

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Write first name, last name and email of every contact with an email
    Csv(ExportCsvArgs),
}

#[derive(Debug, Args)]
pub struct ExportCsvArgs {
    #[arg(
        long,
        help = "Read contacts from a JSON file instead of the ChurchSuite API"
    )]
    pub input: Option<PathBuf>,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportReport {
    format: String,
    count: usize,
    output: String,
}

pub fn export_csv(ctx: &Context<'_>, args: ExportCsvArgs) -> Result<()> {
    let contacts = load_contacts(ctx, args.input.as_deref())?;
    let path = args
        .out
        .unwrap_or_else(|| ctx.config.export.csv_path.clone());
    let count = export_contacts_csv(&path, &contacts)
        .with_context(|| format!("write csv export {}", path.display()))?;

    let report = ExportReport {
        format: "csv".to_string(),
        count,
        output: path.display().to_string(),
    };
    if ctx.json {
        print_json(&report)
    } else {
        println!("Exported {} contacts to {}", report.count, report.output);
        Ok(())
    }
}
