use crate::Result;
use tidybook_core::Contact;

/// Supplies the complete contact list for one analysis run, or fails.
pub trait ContactSource {
    fn source_name(&self) -> &'static str;
    fn fetch_contacts(&self) -> Result<Vec<Contact>>;
}
