use serde::{Deserialize, Serialize};

use worktrack_core::{DomainResult, Entity, ProjectId, RequiredText, TaskId};

use crate::task::Task;

/// A project and its in-memory task list.
///
/// The list is a snapshot loaded from the store; membership is decided by each
/// task's `project_id`, not by this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: Option<ProjectId>,
    title: RequiredText,
    tasks: Vec<Task>,
}

impl Project {
    /// Create a new, not-yet-persisted project with no tasks.
    pub fn new(title: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            id: None,
            title: RequiredText::parse("project title", title)?,
            tasks: Vec::new(),
        })
    }

    /// Rebuild a persisted project from stored values (tasks are attached separately).
    pub fn restore(id: ProjectId, title: impl Into<String>) -> DomainResult<Self> {
        let mut project = Self::new(title)?;
        project.id = Some(id);
        Ok(project)
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> DomainResult<()> {
        self.title = RequiredText::parse("project title", title)?;
        Ok(())
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove the task with `task_id` from the in-memory list, returning it.
    pub fn remove_task(&mut self, task_id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id() == Some(task_id))?;
        Some(self.tasks.remove(index))
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_tasks_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    /// Share of completed tasks in percent; `0.0` for a project without tasks.
    pub fn progress(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        (self.completed_tasks_count() as f64 / self.tasks.len() as f64) * 100.0
    }
}

impl Entity for Project {
    type Id = ProjectId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }

    fn assign_id(&mut self, id: Self::Id) {
        self.id = Some(id);
    }
}

impl core::fmt::Display for Project {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({:.1}% complete)", self.title, self.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::restore(ProjectId::new(1), "Test project").unwrap()
    }

    fn task(title: &str) -> Task {
        Task::new(title, "", ProjectId::new(1)).unwrap()
    }

    fn completed(title: &str) -> Task {
        let mut t = task(title);
        t.mark_complete();
        t
    }

    #[test]
    fn restore_starts_with_no_tasks() {
        let project = project();
        assert_eq!(project.title(), "Test project");
        assert_eq!(project.id(), Some(ProjectId::new(1)));
        assert!(project.tasks().is_empty());
    }

    #[test]
    fn set_title_rejects_blank() {
        let mut project = project();
        project.set_title("New project").unwrap();
        assert_eq!(project.title(), "New project");
        assert!(project.set_title("").is_err());
        assert!(Project::new("   ").is_err());
        assert_eq!(project.title(), "New project");
    }

    #[test]
    fn add_and_remove_tasks() {
        let mut project = project();
        let mut t = task("Task 1");
        t.assign_id(TaskId::new(10));
        project.add_task(t);
        assert_eq!(project.task_count(), 1);

        assert!(project.remove_task(TaskId::new(99)).is_none());
        let removed = project.remove_task(TaskId::new(10)).unwrap();
        assert_eq!(removed.title(), "Task 1");
        assert_eq!(project.task_count(), 0);
    }

    #[test]
    fn progress_of_empty_project_is_zero() {
        assert_eq!(project().progress(), 0.0);
    }

    #[test]
    fn progress_without_completed_tasks_is_zero() {
        let mut project = project();
        project.add_task(task("Task 1"));
        project.add_task(task("Task 2"));
        assert_eq!(project.progress(), 0.0);
    }

    #[test]
    fn progress_with_all_tasks_completed_is_hundred() {
        let mut project = project();
        project.set_tasks(vec![completed("Task 1"), completed("Task 2")]);
        assert_eq!(project.progress(), 100.0);
    }

    #[test]
    fn progress_with_one_of_two_completed_is_fifty() {
        let mut project = project();
        project.add_task(completed("Task 1"));
        project.add_task(task("Task 2"));
        assert_eq!(project.progress(), 50.0);
        assert_eq!(project.completed_tasks_count(), 1);
        assert_eq!(project.to_string(), "Test project (50.0% complete)");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: progress of k completed out of n equals (k / n) * 100.
            #[test]
            fn progress_matches_completed_share(n in 1usize..50, k_seed in 0usize..50) {
                let k = k_seed % (n + 1);
                let mut project = project();
                for i in 0..n {
                    if i < k {
                        project.add_task(completed("t"));
                    } else {
                        project.add_task(task("t"));
                    }
                }
                prop_assert_eq!(project.completed_tasks_count(), k);
                prop_assert_eq!(project.progress(), (k as f64 / n as f64) * 100.0);
            }
        }
    }
}
