use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email regex is valid")
});

pub fn str_lower(s: &str) -> String {
    s.to_lowercase()
}

pub fn str_upper(s: &str) -> String {
    s.to_uppercase()
}

/// Shape check only: something before the `@`, a dotted domain after it.
pub fn is_email(s: &str) -> bool {
    EMAIL_REGEX.is_match(s)
}

pub fn is_json(s: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(s).is_ok()
}

pub fn is_windows_os() -> bool {
    cfg!(windows)
}
