use crate::churchsuite::ContactPage;
use crate::source::ContactSource;
use crate::{FetchError, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tidybook_core::Contact;

/// Contacts saved to disk, either as a bare array or as one API page.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContactSource for JsonFileSource {
    fn source_name(&self) -> &'static str {
        "json-file"
    }

    fn fetch_contacts(&self) -> Result<Vec<Contact>> {
        let data = fs::read_to_string(&self.path)?;
        let contacts = parse_contacts(&data)?;
        tracing::debug!(
            path = %self.path.display(),
            count = contacts.len(),
            "contacts loaded from file"
        );
        Ok(contacts)
    }
}

pub fn parse_contacts(data: &str) -> Result<Vec<Contact>> {
    let value: Value = serde_json::from_str(data)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(ref map) if map.contains_key("contacts") => {
            let page: ContactPage = serde_json::from_value(value)?;
            Ok(page.contacts)
        }
        _ => Err(FetchError::Parse(
            "expected a JSON array of contacts or an object with a \"contacts\" array".to_string(),
        )),
    }
}
