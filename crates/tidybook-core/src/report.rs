use crate::detect::{
    detect_duplicates, pair_count, DuplicateFindings, EmailGroup, NameGroup, PhoneGroup,
    SimilarNamePair,
};
use crate::domain::{Contact, ContactId};
use crate::error::CoreError;
use crate::rules::similarity::SimilarityThreshold;
use crate::rules::validation::{classify_records, RecordFindings};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

pub const DEFAULT_LARGE_INPUT_WARNING: usize = 5_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    pub similarity_threshold: SimilarityThreshold,
    /// Record count above which the quadratic pair scan is reported as a warning.
    pub large_input_warning: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            similarity_threshold: SimilarityThreshold::default(),
            large_input_warning: DEFAULT_LARGE_INPUT_WARNING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub contacts_analyzed: usize,
    pub pairs_compared: u64,
    pub similarity_threshold: f64,
    pub duplicate_phones: Vec<PhoneGroup>,
    pub duplicate_emails: Vec<EmailGroup>,
    pub duplicate_names: Vec<NameGroup>,
    pub similar_names: Vec<SimilarNamePair>,
    pub invalid_last_names: Vec<Contact>,
    pub missing_phones: Vec<ContactId>,
    pub missing_emails: Vec<ContactId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub duplicate_phone_groups: usize,
    pub duplicate_email_groups: usize,
    pub duplicate_name_groups: usize,
    pub similar_name_pairs: usize,
    pub invalid_last_names: usize,
    pub missing_phones: usize,
    pub missing_emails: usize,
}

impl Report {
    fn assemble(
        contacts_analyzed: usize,
        threshold: SimilarityThreshold,
        duplicates: DuplicateFindings,
        records: RecordFindings,
    ) -> Self {
        Self {
            contacts_analyzed,
            pairs_compared: duplicates.pairs_compared,
            similarity_threshold: threshold.value(),
            duplicate_phones: duplicates.phones,
            duplicate_emails: duplicates.emails,
            duplicate_names: duplicates.names,
            similar_names: duplicates.similar_names,
            invalid_last_names: records.invalid_last_names,
            missing_phones: records.missing_phones,
            missing_emails: records.missing_emails,
        }
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            duplicate_phone_groups: self.duplicate_phones.len(),
            duplicate_email_groups: self.duplicate_emails.len(),
            duplicate_name_groups: self.duplicate_names.len(),
            similar_name_pairs: self.similar_names.len(),
            invalid_last_names: self.invalid_last_names.len(),
            missing_phones: self.missing_phones.len(),
            missing_emails: self.missing_emails.len(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.duplicate_phones.is_empty()
            && self.duplicate_emails.is_empty()
            && self.duplicate_names.is_empty()
            && self.similar_names.is_empty()
            && self.invalid_last_names.is_empty()
            && self.missing_phones.is_empty()
            && self.missing_emails.is_empty()
    }
}

/// Runs every per-record check and the pairwise duplicate scan over `contacts`.
///
/// Ids must be non-blank and unique; anything else about a record degrades to an
/// empty or missing value rather than failing the run.
pub fn analyze(contacts: &[Contact], options: &AnalysisOptions) -> Result<Report, CoreError> {
    ensure_unique_ids(contacts)?;

    let pairs = pair_count(contacts.len());
    if contacts.len() > options.large_input_warning {
        warn!(
            contacts = contacts.len(),
            pairs, "large input: duplicate scan compares every pair of contacts"
        );
    } else {
        debug!(contacts = contacts.len(), pairs, "starting duplicate scan");
    }

    let records = classify_records(contacts);
    let duplicates = detect_duplicates(contacts, options.similarity_threshold);
    let report = Report::assemble(
        contacts.len(),
        options.similarity_threshold,
        duplicates,
        records,
    );
    debug!(summary = ?report.summary(), "analysis complete");
    Ok(report)
}

fn ensure_unique_ids(contacts: &[Contact]) -> Result<(), CoreError> {
    let mut seen: HashSet<&ContactId> = HashSet::with_capacity(contacts.len());
    for contact in contacts {
        if contact.id.is_blank() {
            return Err(CoreError::EmptyContactId);
        }
        if !seen.insert(&contact.id) {
            return Err(CoreError::DuplicateContactId(contact.id.clone()));
        }
    }
    Ok(())
}
