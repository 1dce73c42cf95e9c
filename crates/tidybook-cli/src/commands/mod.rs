use anyhow::{Context as _, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tidybook_config::AppConfig;
use tidybook_core::Contact;
use tidybook_sync::{ChurchSuiteSource, ContactSource, JsonFileSource};
use tracing::debug;

pub mod analyze;
pub mod export;
pub mod fetch;
mod report_fmt;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Reads contacts from `input` when given, otherwise from the configured
/// ChurchSuite account.
pub fn load_contacts(ctx: &Context<'_>, input: Option<&Path>) -> Result<Vec<Contact>> {
    let source: Box<dyn ContactSource> = match input {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => {
            let settings = &ctx.config.churchsuite;
            Box::new(ChurchSuiteSource::new(
                settings.base_url.clone(),
                settings.api_key.clone(),
                settings.account.clone(),
                settings.application.clone(),
                settings.per_page,
            ))
        }
    };
    let contacts = source
        .fetch_contacts()
        .with_context(|| format!("fetch contacts from {}", source.source_name()))?;
    debug!(
        source = source.source_name(),
        count = contacts.len(),
        "contacts fetched"
    );
    Ok(contacts)
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    Ok(())
}
