use crate::domain::email::normalize_email;
use crate::domain::ids::ContactId;
use crate::domain::phone::normalize_phone;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Contact {
    pub fn new(
        id: impl Into<ContactId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            telephone: None,
            email: None,
        }
    }

    pub fn with_telephone(mut self, telephone: impl Into<String>) -> Self {
        self.telephone = Some(telephone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// First and last name joined by a single space, in their original casing.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive comparison key for [`Contact::full_name`].
    pub fn name_key(&self) -> String {
        self.full_name().to_lowercase()
    }

    pub fn normalized_phone(&self) -> Option<String> {
        self.telephone.as_deref().and_then(normalize_phone)
    }

    pub fn normalized_email(&self) -> Option<String> {
        self.email.as_deref().and_then(normalize_email)
    }

    /// Email as exported: present and non-empty, original casing.
    pub fn export_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|value| !value.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::Contact;

    #[test]
    fn full_name_preserves_casing() {
        let contact = Contact::new("1", "Ada", "LOVELACE");
        assert_eq!(contact.full_name(), "Ada LOVELACE");
        assert_eq!(contact.name_key(), "ada lovelace");
    }

    #[test]
    fn empty_names_still_join_with_space() {
        let contact = Contact::new("1", "", "");
        assert_eq!(contact.full_name(), " ");
    }

    #[test]
    fn normalized_fields_treat_blank_as_missing() {
        let contact = Contact::new("1", "Ada", "Lovelace")
            .with_telephone("   ")
            .with_email("");
        assert!(contact.normalized_phone().is_none());
        assert!(contact.normalized_email().is_none());
        assert!(contact.export_email().is_none());
    }

    #[test]
    fn whitespace_email_is_present() {
        let contact = Contact::new("1", "Ada", "Lovelace").with_email(" ");
        assert_eq!(contact.normalized_email().as_deref(), Some(" "));
        assert_eq!(contact.export_email(), Some(" "));
    }

    #[test]
    fn deserialize_tolerates_null_and_absent_fields() {
        let contact: Contact = serde_json::from_str(
            r#"{"id": 7, "first_name": null, "last_name": "Doe", "telephone": null, "extra": true}"#,
        )
        .expect("parse contact");
        assert_eq!(contact.id.as_str(), "7");
        assert_eq!(contact.first_name, "");
        assert_eq!(contact.last_name, "Doe");
        assert!(contact.telephone.is_none());
        assert!(contact.email.is_none());
    }

    #[test]
    fn deserialize_requires_id() {
        let result = serde_json::from_str::<Contact>(r#"{"first_name": "Ada"}"#);
        assert!(result.is_err());
    }
}
