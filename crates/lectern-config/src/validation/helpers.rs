//! Shared helpers used by the section validators.

/// Push an error unless `value` is a single non-empty class/attribute token.
pub(crate) fn validate_token(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.is_empty() {
        errors.push(format!("{name} must not be empty"));
    } else if value.chars().any(char::is_whitespace) {
        errors.push(format!("{name} = {value:?} must not contain whitespace"));
    }
}
