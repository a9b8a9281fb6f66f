//! Boolean normalization for boundary inputs
//!
//! HTML forms submit availability as `"Yes"` / `"No"`, query strings as
//! `"true"` / `"false"`. Both are folded into a plain `bool` here, before
//! anything reaches the service.

/// Parse a boolean-like string (case-insensitive, trimmed)
///
/// Accepts `true`/`false` and `yes`/`no`.
pub fn parse_flag(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_form_values() {
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag("No"), Some(false));
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" FALSE "), Some(false));
    }

    #[test]
    fn test_parse_flag_rejects_other_values() {
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
        assert_eq!(parse_flag("1"), None);
    }
}
