use crate::domain::contact::Contact;

/// Comparable forms of a contact, computed once per record so the pair scan
/// never re-normalizes.
#[derive(Debug, Clone)]
pub struct NormalizedContact<'a> {
    pub contact: &'a Contact,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub full_name: String,
    pub name_key: String,
}

impl<'a> NormalizedContact<'a> {
    pub fn new(contact: &'a Contact) -> Self {
        let full_name = contact.full_name();
        let name_key = full_name.to_lowercase();
        Self {
            contact,
            phone: contact.normalized_phone(),
            email: contact.normalized_email(),
            full_name,
            name_key,
        }
    }
}
