pub mod contact;
pub mod email;
pub mod ids;
pub mod normalized;
pub mod phone;

pub use contact::Contact;
pub use email::normalize_email;
pub use ids::ContactId;
pub use normalized::NormalizedContact;
pub use phone::normalize_phone;
