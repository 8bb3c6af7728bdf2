//! `worktrack-store`
//!
//! **Responsibility:** durable storage of employees, projects and tasks in a
//! single SQLite file.
//!
//! This crate provides:
//! - A synchronous `WorkStore` facade over one lazily opened connection
//! - Idempotent schema creation on first use
//! - Cascading deletes (project -> tasks) and nulling deletes (employee -> task assignee)

pub mod config;
mod connection;
pub mod error;
mod schema;
pub mod store;

mod employees;
mod projects;
mod tasks;

pub use config::{DatabaseLocation, StoreConfig, DB_PATH_ENV};
pub use error::{StoreError, StoreResult};
pub use store::WorkStore;
