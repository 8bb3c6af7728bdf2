use core::str::FromStr;

use serde::{Deserialize, Serialize};

use worktrack_core::{DomainError, DomainResult, EmployeeId, Entity, ProjectId, RequiredText, TaskId};

/// Task status lifecycle. Only moves forward: `InProgress` -> `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    /// Stored/displayed form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl core::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(DomainError::validation(format!("unknown task status: {other:?}"))),
        }
    }
}

/// A unit of work inside a project, optionally assigned to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: Option<TaskId>,
    title: RequiredText,
    description: String,
    status: TaskStatus,
    assignee: Option<EmployeeId>,
    project_id: ProjectId,
}

impl Task {
    /// Create a new, unassigned, in-progress task belonging to `project_id`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        project_id: ProjectId,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: None,
            title: RequiredText::parse("task title", title)?,
            description: description.into(),
            status: TaskStatus::InProgress,
            assignee: None,
            project_id,
        })
    }

    /// Rebuild a persisted task from stored values.
    pub fn restore(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
        assignee: Option<EmployeeId>,
        project_id: ProjectId,
    ) -> DomainResult<Self> {
        let mut task = Self::new(title, description, project_id)?;
        task.id = Some(id);
        task.status = status;
        task.assignee = assignee;
        Ok(task)
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn assignee(&self) -> Option<EmployeeId> {
        self.assignee
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_assigned(&self) -> bool {
        self.assignee.is_some()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> DomainResult<()> {
        self.title = RequiredText::parse("task title", title)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn assign_employee(&mut self, employee: EmployeeId) {
        self.assignee = Some(employee);
    }

    pub fn unassign(&mut self) {
        self.assignee = None;
    }

    pub fn move_to_project(&mut self, project_id: ProjectId) {
        self.project_id = project_id;
    }

    /// Mark the task completed. Completing a completed task is a no-op.
    pub fn mark_complete(&mut self) {
        self.status = TaskStatus::Completed;
    }
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }

    fn assign_id(&mut self, id: Self::Id) {
        self.id = Some(id);
    }
}

impl core::fmt::Display for Task {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} [{}]", self.title, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_task() -> Task {
        Task::restore(
            TaskId::new(1),
            "Build module",
            "Task description",
            TaskStatus::InProgress,
            None,
            ProjectId::new(1),
        )
        .unwrap()
    }

    #[test]
    fn restore_exposes_every_attribute() {
        let task = module_task();
        assert_eq!(task.id(), Some(TaskId::new(1)));
        assert_eq!(task.title(), "Build module");
        assert_eq!(task.description(), "Task description");
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert_eq!(task.project_id(), ProjectId::new(1));
        assert_eq!(task.assignee(), None);
    }

    #[test]
    fn new_task_defaults_to_in_progress_and_unassigned() {
        let task = Task::new("Test", "", ProjectId::new(9)).unwrap();
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert!(!task.is_assigned());
        assert_eq!(task.id(), None);
    }

    #[test]
    fn set_title_rejects_blank_and_keeps_old_title() {
        let mut task = module_task();
        task.set_title("New title").unwrap();
        assert_eq!(task.title(), "New title");

        assert!(task.set_title("").is_err());
        assert!(task.set_title(" \t").is_err());
        assert_eq!(task.title(), "New title");
    }

    #[test]
    fn mark_complete_is_one_way_and_idempotent() {
        let mut task = module_task();
        assert!(!task.is_completed());
        task.mark_complete();
        assert!(task.is_completed());
        task.mark_complete();
        assert_eq!(task.status(), TaskStatus::Completed);
    }

    #[test]
    fn assignment_is_by_employee_id() {
        let mut task = module_task();
        task.assign_employee(EmployeeId::new(5));
        assert_eq!(task.assignee(), Some(EmployeeId::new(5)));
        task.unassign();
        assert_eq!(task.assignee(), None);
    }

    #[test]
    fn status_parses_only_known_values() {
        assert_eq!("in progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn display_shows_title_and_status() {
        let task = module_task();
        assert_eq!(task.to_string(), "Build module [in progress]");
    }

    #[test]
    fn serialized_status_matches_stored_form() {
        let json = serde_json::to_value(module_task()).unwrap();
        assert_eq!(json["status"], TaskStatus::InProgress.as_str());
        assert_eq!(json["title"], "Build module");

        for status in [TaskStatus::InProgress, TaskStatus::Completed] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            assert_eq!(serde_json::from_str::<TaskStatus>(&json).unwrap(), status);
        }
    }

    #[test]
    fn move_to_project_changes_owner_only() {
        let mut task = module_task();
        task.assign_employee(EmployeeId::new(3));
        task.move_to_project(ProjectId::new(99));

        assert_eq!(task.project_id(), ProjectId::new(99));
        assert_eq!(task.assignee(), Some(EmployeeId::new(3)));
        assert_eq!(task.title(), "Build module");
        assert_eq!(task.status(), TaskStatus::InProgress);
    }
}
