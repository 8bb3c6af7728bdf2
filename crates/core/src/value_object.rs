//! Value objects: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. The concrete value objects here are smart constructors:
//! an instance can only exist if its invariant holds, so entities holding one never
//! need to re-check it.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// The trait requires:
/// - **Clone**: Value objects should be cheap to copy (they're values, not references)
/// - **PartialEq**: Value objects are compared by their attribute values
/// - **Debug**: Value objects should be debuggable (helpful for logging, testing)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Text that is neither empty nor whitespace-only.
///
/// The original input is kept as-is (no trimming); only the check looks past
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequiredText(String);

impl RequiredText {
    /// Validate `value`, naming `field` in the error.
    pub fn parse(field: &str, value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation(format!("{field} cannot be empty")));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for RequiredText {}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RequiredText {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RequiredText {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse("text", value)
    }
}

impl From<RequiredText> for String {
    fn from(value: RequiredText) -> Self {
        value.0
    }
}

/// A finite, non-negative quantity (money, hours).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct NonNegative(f64);

impl NonNegative {
    pub const ZERO: Self = Self(0.0);

    /// Validate `value`, naming `field` in the error.
    pub fn parse(field: &str, value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation(format!("{field} must be a finite number")));
        }
        if value < 0.0 {
            return Err(DomainError::validation(format!("{field} cannot be negative")));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Sum of two non-negative values; fails only if the sum overflows to infinity.
    pub fn checked_add(self, field: &str, other: Self) -> DomainResult<Self> {
        Self::parse(field, self.0 + other.0)
    }
}

impl ValueObject for NonNegative {}

impl TryFrom<f64> for NonNegative {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::parse("value", value)
    }
}

impl From<NonNegative> for f64 {
    fn from(value: NonNegative) -> Self {
        value.0
    }
}
