pub mod similarity;
pub mod validation;

pub use similarity::{
    are_names_similar, compare_name_keys, compare_names, key_ratio, names_equal,
    similarity_ratio, NameComparison, SimilarityThreshold, DEFAULT_SIMILARITY_THRESHOLD,
};
pub use validation::{
    classify_records, has_missing_email, has_missing_phone, is_invalid_last_name,
    validate_contact, RecordFindings, RecordIssues,
};
