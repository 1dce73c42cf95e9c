use crate::error::ExportError;
use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tidybook_core::Contact;

pub const CSV_HEADER: [&str; 3] = ["First Name", "Last Name", "Email Address"];

/// Writes one row per contact that has an email, in input order. This is a
/// pass-through of the contact list: duplicates are not collapsed.
pub fn write_contacts_csv<W: Write>(
    writer: W,
    contacts: &[Contact],
) -> Result<usize, ExportError> {
    let mut w = WriterBuilder::new().from_writer(writer);
    w.write_record(CSV_HEADER)?;
    let mut rows = 0;
    for contact in contacts {
        let Some(email) = contact.export_email() else {
            continue;
        };
        w.write_record([
            contact.first_name.as_str(),
            contact.last_name.as_str(),
            email,
        ])?;
        rows += 1;
    }
    w.flush()?;
    Ok(rows)
}

pub fn export_contacts_csv(path: &Path, contacts: &[Contact]) -> Result<usize, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let rows = write_contacts_csv(BufWriter::new(file), contacts)?;
    tracing::debug!(path = %path.display(), rows, "csv export written");
    Ok(rows)
}
