//! Text collaborators for the work tracker.
//!
//! Pattern extraction, display formatting, lenient numeric parsing and flat
//! CSV reading. None of this touches the domain model.

pub mod format;
pub mod patterns;
pub mod table;

pub use format::{
    calculate_percentage, format_currency, format_hours, safe_float, truncate_text, DEFAULT_CURRENCY,
};
pub use patterns::{extract_emails, extract_phone_numbers, validate_email};
pub use table::{read_csv, read_csv_with, CsvOptions, Table, TextError};
