//! Staff domain module.
//!
//! This crate contains business rules for employees (pay, accrued hours),
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod employee;

pub use employee::{Employee, HOURS_PER_MONTH};
