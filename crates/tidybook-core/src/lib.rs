pub mod detect;
pub mod domain;
pub mod error;
pub mod report;
pub mod rules;

pub use detect::{
    detect_duplicates, pair_count, DuplicateDetector, DuplicateFindings, EmailGroup, NameGroup,
    PhoneGroup, SimilarNamePair,
};
pub use domain::*;
pub use error::CoreError;
pub use report::{analyze, AnalysisOptions, Report, ReportSummary, DEFAULT_LARGE_INPUT_WARNING};
pub use rules::*;
