//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use worktrack_core::{EmployeeId, ProjectId, TaskId};
use worktrack_store::DB_PATH_ENV;

#[derive(Debug, Parser)]
#[command(name = "worktrack")]
#[command(about = "Track employees, projects and tasks in a local SQLite file")]
pub struct Cli {
    /// Database file; defaults to the per-user data directory
    #[arg(long, env = DB_PATH_ENV, global = true)]
    pub db: Option<PathBuf>,

    /// Emit logs as JSON instead of compact text
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage employees
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Summary of payroll, hours and project progress
    Report {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Task completion and assignment counts
    Stats,

    /// Extract email addresses and phone numbers from text
    Emails { text: String },

    /// Profile the columns of a CSV file
    Csv(CsvArgs),
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    Add {
        name: String,
        #[arg(long, default_value = "")]
        position: String,
        /// Monthly salary
        #[arg(long, default_value_t = 0.0)]
        salary: f64,
    },
    List {
        /// Order by hours worked, most first
        #[arg(long)]
        by_hours: bool,
    },
    Update {
        id: EmployeeId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        salary: Option<f64>,
    },
    Delete { id: EmployeeId },
    /// Log additional hours worked
    AddHours { id: EmployeeId, hours: f64 },
    /// Show pay owed for the hours logged
    Pay { id: EmployeeId },
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    Add { title: String },
    List {
        /// Order by progress, most complete first
        #[arg(long)]
        by_progress: bool,
    },
    Rename { id: ProjectId, title: String },
    /// Delete a project together with its tasks
    Delete { id: ProjectId },
    Progress { id: ProjectId },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Add {
        project: ProjectId,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    List {
        /// Only tasks of this project
        #[arg(long)]
        project: Option<ProjectId>,
    },
    Assign { task: TaskId, employee: EmployeeId },
    Unassign { task: TaskId },
    Complete { task: TaskId },
    Delete { task: TaskId },
}

#[derive(Debug, Args)]
pub struct CsvArgs {
    pub path: PathBuf,

    /// Field delimiter (single ASCII character)
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Keep rows that have blank cells
    #[arg(long)]
    pub keep_incomplete: bool,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}
