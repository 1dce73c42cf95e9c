use crate::domain::ContactId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("contact id is required")]
    EmptyContactId,
    #[error("duplicate contact id: {0}")]
    DuplicateContactId(ContactId),
    #[error("invalid similarity threshold: {0} (expected a value between 0 and 1)")]
    InvalidSimilarityThreshold(f64),
}
