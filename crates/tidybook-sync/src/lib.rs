pub mod churchsuite;
pub mod error;
pub mod export;
pub mod json;
pub mod source;

pub use churchsuite::{fetch_all_pages, ChurchSuiteSource, ContactPage, PageFetcher, Pagination};
pub use error::{ExportError, FetchError, Result};
pub use export::{export_contacts_csv, write_contacts_csv, CSV_HEADER};
pub use json::{parse_contacts, JsonFileSource};
pub use source::ContactSource;
