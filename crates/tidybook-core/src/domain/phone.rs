/// Trims surrounding whitespace. Formatting differences are kept on purpose, so
/// `555-1234` and `5551234` never compare equal.
pub fn normalize_phone(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
