//! `worktrack-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model, row identifiers, and validated value objects shared by the
//! staff and projects modules.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{EmployeeId, ProjectId, TaskId};
pub use value_object::{NonNegative, RequiredText, ValueObject};
