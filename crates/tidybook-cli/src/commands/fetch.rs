use crate::commands::{ensure_parent_dir, load_contacts, print_json, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[arg(long, help = "Write the contacts to this file instead of stdout")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FetchReport {
    count: usize,
    output: String,
}

pub fn fetch(ctx: &Context<'_>, args: FetchArgs) -> Result<()> {
    if ctx.json && args.out.is_none() {
        return Err(invalid_input("--json requires --out for fetch"));
    }

    let contacts = load_contacts(ctx, None)?;

    let Some(path) = args.out else {
        return print_json(&contacts);
    };

    ensure_parent_dir(&path)?;
    let data = serde_json::to_string_pretty(&contacts)?;
    fs::write(&path, data).with_context(|| format!("write contacts file {}", path.display()))?;

    if ctx.json {
        print_json(&FetchReport {
            count: contacts.len(),
            output: path.display().to_string(),
        })
    } else {
        println!("Saved {} contacts to {}", contacts.len(), path.display());
        Ok(())
    }
}
