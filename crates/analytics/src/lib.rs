//! Read-only reporting over employees, projects and tabular files.
//!
//! Every function here is a pure computation over a snapshot the caller has
//! already fetched; nothing is cached between calls and nothing is written back.

pub mod report;
pub mod table_analysis;
pub mod task_stats;

pub use report::{EmployeeSummary, ProjectSummary, WorkAnalytics, WorkReport};
pub use table_analysis::{analyze_table, ColumnSummary, ColumnType, NumericStats, TableAnalysis};
pub use task_stats::{task_statistics, TaskStatistics};
