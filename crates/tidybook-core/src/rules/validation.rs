use crate::domain::{Contact, ContactId};
use serde::Serialize;

/// A surname is valid when it is non-empty and made only of ASCII letters,
/// hyphens, apostrophes and spaces. Accented letters are rejected.
pub fn is_invalid_last_name(last_name: &str) -> bool {
    last_name.is_empty() || !last_name.chars().all(is_surname_char)
}

fn is_surname_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, '-' | '\'' | ' ')
}

pub fn has_missing_phone(contact: &Contact) -> bool {
    contact.normalized_phone().is_none()
}

pub fn has_missing_email(contact: &Contact) -> bool {
    contact.normalized_email().is_none()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordIssues {
    pub invalid_last_name: bool,
    pub missing_phone: bool,
    pub missing_email: bool,
}

impl RecordIssues {
    pub fn is_clean(&self) -> bool {
        !(self.invalid_last_name || self.missing_phone || self.missing_email)
    }
}

pub fn validate_contact(contact: &Contact) -> RecordIssues {
    RecordIssues {
        invalid_last_name: is_invalid_last_name(&contact.last_name),
        missing_phone: has_missing_phone(contact),
        missing_email: has_missing_email(contact),
    }
}

/// Single-record classifications, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordFindings {
    pub invalid_last_names: Vec<Contact>,
    pub missing_phones: Vec<ContactId>,
    pub missing_emails: Vec<ContactId>,
}

pub fn classify_records(contacts: &[Contact]) -> RecordFindings {
    let mut findings = RecordFindings::default();
    for contact in contacts {
        let issues = validate_contact(contact);
        if issues.invalid_last_name {
            findings.invalid_last_names.push(contact.clone());
        }
        if issues.missing_phone {
            findings.missing_phones.push(contact.id.clone());
        }
        if issues.missing_email {
            findings.missing_emails.push(contact.id.clone());
        }
    }
    findings
}
