//! Employee and project summaries.

use serde::Serialize;

use worktrack_core::{EmployeeId, Entity, ProjectId};
use worktrack_projects::Project;
use worktrack_staff::Employee;
use worktrack_text::calculate_percentage;

/// One row of the employee summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub id: Option<EmployeeId>,
    pub name: String,
    pub position: String,
    pub salary: f64,
    pub hours_worked: f64,
    pub pay: f64,
}

/// One row of the project summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub id: Option<ProjectId>,
    pub title: String,
    pub task_count: usize,
    pub completed_count: usize,
    pub progress: f64,
}

/// Everything the analytics view shows at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkReport {
    pub total_employees: usize,
    pub total_projects: usize,
    pub total_salary_expenses: f64,
    pub total_hours_worked: f64,
    pub average_salary: f64,
    pub overall_progress: f64,
    pub employees_summary: Vec<EmployeeSummary>,
    pub projects_summary: Vec<ProjectSummary>,
}

/// Aggregations over a snapshot of employees and projects (with their tasks loaded).
#[derive(Debug, Clone, Copy)]
pub struct WorkAnalytics<'a> {
    employees: &'a [Employee],
    projects: &'a [Project],
}

impl<'a> WorkAnalytics<'a> {
    pub fn new(employees: &'a [Employee], projects: &'a [Project]) -> Self {
        Self { employees, projects }
    }

    /// One row per employee, in input order.
    pub fn employees_summary(&self) -> Vec<EmployeeSummary> {
        self.employees
            .iter()
            .map(|e| EmployeeSummary {
                id: e.id(),
                name: e.name().to_string(),
                position: e.position().to_string(),
                salary: e.salary(),
                hours_worked: e.hours_worked(),
                pay: e.calculate_pay(),
            })
            .collect()
    }

    /// One row per project, in input order.
    pub fn projects_summary(&self) -> Vec<ProjectSummary> {
        self.projects
            .iter()
            .map(|p| ProjectSummary {
                id: p.id(),
                title: p.title().to_string(),
                task_count: p.task_count(),
                completed_count: p.completed_tasks_count(),
                progress: p.progress(),
            })
            .collect()
    }

    /// Sum of pay owed to every employee.
    pub fn total_salary_expenses(&self) -> f64 {
        self.employees.iter().map(Employee::calculate_pay).sum()
    }

    pub fn total_hours_worked(&self) -> f64 {
        self.employees.iter().map(Employee::hours_worked).sum()
    }

    /// Mean monthly salary; `0.0` without employees.
    pub fn average_salary(&self) -> f64 {
        if self.employees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.employees.iter().map(Employee::salary).sum();
        total / self.employees.len() as f64
    }

    /// Completed tasks over all tasks across every project, in percent.
    ///
    /// Weighted by task, so a large project counts more than a small one.
    pub fn overall_progress(&self) -> f64 {
        let (completed, total) = self.projects.iter().fold((0usize, 0usize), |(done, all), p| {
            (done + p.completed_tasks_count(), all + p.task_count())
        });
        calculate_percentage(completed as f64, total as f64)
    }

    /// Employees ordered by hours worked; ties keep input order.
    pub fn employees_by_hours(&self, descending: bool) -> Vec<&'a Employee> {
        let mut sorted: Vec<&Employee> = self.employees.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering = a.hours_worked().total_cmp(&b.hours_worked());
            if descending { ordering.reverse() } else { ordering }
        });
        sorted
    }

    /// Projects ordered by progress; ties keep input order.
    pub fn projects_by_progress(&self, descending: bool) -> Vec<&'a Project> {
        let mut sorted: Vec<&Project> = self.projects.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering = a.progress().total_cmp(&b.progress());
            if descending { ordering.reverse() } else { ordering }
        });
        sorted
    }

    pub fn generate_report(&self) -> WorkReport {
        WorkReport {
            total_employees: self.employees.len(),
            total_projects: self.projects.len(),
            total_salary_expenses: self.total_salary_expenses(),
            total_hours_worked: self.total_hours_worked(),
            average_salary: self.average_salary(),
            overall_progress: self.overall_progress(),
            employees_summary: self.employees_summary(),
            projects_summary: self.projects_summary(),
        }
    }
}
