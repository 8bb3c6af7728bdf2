//! Email and phone number patterns.

use std::sync::LazyLock;

use regex::Regex;

const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

static EMAIL_ANCHORED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{EMAIL_PATTERN}$")).expect("anchored email pattern is valid")
});

// Russian-style numbers: optional +7/8 prefix, 3-3-2-2 digit groups.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+7|8)?[\s\-]?\(?\d{3}\)?[\s\-]?\d{3}[\s\-]?\d{2}[\s\-]?\d{2}")
        .expect("phone pattern is valid")
});

/// All email addresses in `text`, in order of appearance.
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Whether `email` is a single well-formed address.
pub fn validate_email(email: &str) -> bool {
    EMAIL_ANCHORED.is_match(email)
}

/// All phone numbers in `text`, in order of appearance.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    PHONE.find_iter(text).map(|m| m.as_str().to_string()).collect()
}
