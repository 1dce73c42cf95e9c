use crate::commands::report_fmt::render_human;
use crate::commands::{load_contacts, print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tidybook_core::{analyze as run_analysis, Report, ReportSummary, SimilarityThreshold};
use tidybook_sync::export_contacts_csv;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[arg(
        long,
        help = "Read contacts from a JSON file instead of the ChurchSuite API"
    )]
    pub input: Option<PathBuf>,
    #[arg(
        long,
        help = "Similarity ratio (0-1) above which two names are reported as similar"
    )]
    pub threshold: Option<f64>,
    #[arg(
        long,
        num_args = 0..=1,
        value_name = "PATH",
        help = "Also write contacts with an email to CSV (defaults to the configured path)"
    )]
    pub export_csv: Option<Option<PathBuf>>,
}

#[derive(Debug, Serialize)]
struct AnalyzeOutput<'a> {
    summary: ReportSummary,
    report: &'a Report,
    csv_export: Option<CsvExportInfo>,
}

#[derive(Debug, Serialize)]
struct CsvExportInfo {
    path: String,
    rows: usize,
}

pub fn analyze(ctx: &Context<'_>, args: AnalyzeArgs) -> Result<()> {
    let mut options = ctx.config.analysis;
    if let Some(threshold) = args.threshold {
        options.similarity_threshold =
            SimilarityThreshold::new(threshold).with_context(|| "parse --threshold")?;
    }

    let contacts = load_contacts(ctx, args.input.as_deref())?;
    let report = run_analysis(&contacts, &options).with_context(|| "analyze contacts")?;

    let csv_export = match args.export_csv {
        Some(path) => {
            let path = path.unwrap_or_else(|| ctx.config.export.csv_path.clone());
            let rows = export_contacts_csv(&path, &contacts)
                .with_context(|| format!("write csv export {}", path.display()))?;
            Some(CsvExportInfo {
                path: path.display().to_string(),
                rows,
            })
        }
        None => None,
    };

    if ctx.json {
        return print_json(&AnalyzeOutput {
            summary: report.summary(),
            report: &report,
            csv_export,
        });
    }

    print!("{}", render_human(&report, &contacts));
    if let Some(export) = csv_export {
        println!();
        println!("Exported {} contacts to {}", export.rows, export.path);
    }
    Ok(())
}
