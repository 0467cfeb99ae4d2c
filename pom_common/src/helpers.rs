/// Interpret a configuration flag value. Unrecognised values yield `None` so the caller can fall
/// back to its own default.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split a credential list on commas or newlines, dropping empty entries.
/// Lets deployments supply several shop tokens in a single environment variable.
pub fn split_token_list(value: &str) -> Vec<String> {
    value.split([',', '\n']).map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn boolean_flags() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("banana"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn token_lists() {
        assert_eq!(split_token_list(""), Vec::<String>::new());
        assert_eq!(split_token_list("abc"), vec!["abc"]);
        assert_eq!(split_token_list("abc, def\nghi,\n"), vec!["abc", "def", "ghi"]);
    }
}
