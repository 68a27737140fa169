use crate::error::ConfigError;

/// Check that a string is all lowercase and is a valid DNS label.  Namespace
/// names must be DNS labels.
pub fn is_valid_dns_label(s: &str) -> bool {
    let valid_character = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';

    !s.is_empty()
        && s.len() <= 63
        && s.chars().all(valid_character)
        && s.starts_with(|c: char| c.is_ascii_alphanumeric())
        && !s.ends_with(|c: char| c == '-')
}

/// Check that a string is a valid DNS subdomain: dot-separated DNS labels, at
/// most 253 characters.
pub fn is_valid_dns_subdomain(s: &str) -> bool {
    !s.is_empty() && s.len() <= 253 && s.split('.').all(is_valid_dns_label)
}

/// Check that a string is a valid label name: 1 to 63 characters, ASCII
/// alphanumerics plus `-`, `_`, and `.`, beginning and ending with an
/// alphanumeric.
pub fn is_valid_label_name(s: &str) -> bool {
    let valid_character = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.';

    !s.is_empty()
        && s.len() <= 63
        && s.chars().all(valid_character)
        && s.starts_with(|c: char| c.is_ascii_alphanumeric())
        && s.ends_with(|c: char| c.is_ascii_alphanumeric())
}

/// Check that a string is a valid label key: an optional DNS subdomain prefix
/// and a `/`, followed by a label name.
pub fn is_valid_label_key(s: &str) -> bool {
    match s.split_once('/') {
        Some((prefix, name)) => is_valid_dns_subdomain(prefix) && is_valid_label_name(name),
        None => is_valid_label_name(s),
    }
}

/// Reject a namespace that could never exist.
pub fn check_namespace(namespace: &str) -> Result<(), ConfigError> {
    if is_valid_dns_label(namespace) {
        Ok(())
    } else {
        Err(ConfigError::BadNamespace(namespace.to_owned()))
    }
}
