//! Display formatting and lenient numeric conversion.

/// Currency symbol appended by [`format_currency`] in the desktop views.
pub const DEFAULT_CURRENCY: &str = "₽";

/// Format `amount` with two decimals, thousands separated by spaces, and a
/// trailing currency symbol: `1234567.5` -> `"1 234 567.50 ₽"`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
    format!("{sign}{grouped}.{fraction} {currency}")
}

/// Format hours with one decimal: `"12.5 h"`.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.1} h")
}

/// `part` as a percentage of `total`; `0.0` when `total` is zero.
pub fn calculate_percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    (part / total) * 100.0
}

/// Parse a number from user-supplied text, falling back to `default`.
pub fn safe_float(value: &str, default: f64) -> f64 {
    value.trim().parse::<f64>().unwrap_or(default)
}

const ELLIPSIS: &str = "...";

/// Cut `text` to at most `max_length` characters, ending in `...` when shortened.
///
/// Below four characters there is no room for the ellipsis, so the text is cut bare.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    if max_length <= ELLIPSIS.len() {
        return text.chars().take(max_length).collect();
    }
    let keep = max_length - ELLIPSIS.len();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
