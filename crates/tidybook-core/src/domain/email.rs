/// Lower-cases the address. Only an empty value counts as missing; whitespace
/// is kept as-is.
pub fn normalize_email(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    Some(value.to_lowercase())
}
