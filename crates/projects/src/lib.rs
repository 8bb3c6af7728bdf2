//! Projects domain module (projects and their tasks).
//!
//! This crate contains business rules for projects and tasks, implemented
//! purely as deterministic domain logic (no IO, no storage). A task refers to
//! its assignee by `EmployeeId` only; resolving the employee is the store's job.

pub mod project;
pub mod task;

pub use project::Project;
pub use task::{Task, TaskStatus};
