use serde::Serialize;

use worktrack_projects::Project;
use worktrack_text::calculate_percentage;

/// Counts over every task of every project.
///
/// `total == completed + in_progress == assigned + unassigned` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TaskStatistics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub completion_rate: f64,
    pub assignment_rate: f64,
}

pub fn task_statistics(projects: &[Project]) -> TaskStatistics {
    let mut stats = TaskStatistics::default();
    for task in projects.iter().flat_map(Project::tasks) {
        stats.total += 1;
        if task.is_completed() {
            stats.completed += 1;
        } else {
            stats.in_progress += 1;
        }
        if task.is_assigned() {
            stats.assigned += 1;
        } else {
            stats.unassigned += 1;
        }
    }

    stats.completion_rate = calculate_percentage(stats.completed as f64, stats.total as f64);
    stats.assignment_rate = calculate_percentage(stats.assigned as f64, stats.total as f64);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use worktrack_core::{EmployeeId, ProjectId};
    use worktrack_projects::Task;

    fn task(project_id: ProjectId, completed: bool, assignee: Option<i64>) -> Task {
        let mut task = Task::new("t", "", project_id).unwrap();
        if completed {
            task.mark_complete();
        }
        if let Some(id) = assignee {
            task.assign_employee(EmployeeId::new(id));
        }
        task
    }

    #[test]
    fn no_tasks_means_zero_rates() {
        assert_eq!(task_statistics(&[]), TaskStatistics::default());

        let empty = Project::restore(ProjectId::new(1), "Empty").unwrap();
        let stats = task_statistics(&[empty]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.assignment_rate, 0.0);
    }

    #[test]
    fn counts_across_projects() {
        let a = ProjectId::new(1);
        let b = ProjectId::new(2);
        let mut first = Project::restore(a, "A").unwrap();
        first.add_task(task(a, true, Some(1)));
        first.add_task(task(a, false, None));
        let mut second = Project::restore(b, "B").unwrap();
        second.add_task(task(b, true, None));
        second.add_task(task(b, false, Some(2)));

        let stats = task_statistics(&[first, second]);
        assert_eq!(
            stats,
            TaskStatistics {
                total: 4,
                completed: 2,
                in_progress: 2,
                assigned: 2,
                unassigned: 2,
                completion_rate: 50.0,
                assignment_rate: 50.0,
            }
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn totals_partition_both_ways(
                layout in prop::collection::vec(
                    prop::collection::vec((any::<bool>(), any::<bool>()), 0..8),
                    0..6,
                )
            ) {
                let projects: Vec<Project> = layout
                    .iter()
                    .enumerate()
                    .map(|(i, tasks)| {
                        let id = ProjectId::new(i as i64 + 1);
                        let mut project = Project::restore(id, "p").unwrap();
                        for &(completed, assigned) in tasks {
                            project.add_task(task(id, completed, assigned.then_some(1)));
                        }
                        project
                    })
                    .collect();

                let stats = task_statistics(&projects);
                let expected: usize = layout.iter().map(Vec::len).sum();
                prop_assert_eq!(stats.total, expected);
                prop_assert_eq!(stats.total, stats.completed + stats.in_progress);
                prop_assert_eq!(stats.total, stats.assigned + stats.unassigned);
                prop_assert!((0.0..=100.0).contains(&stats.completion_rate));
                prop_assert!((0.0..=100.0).contains(&stats.assignment_rate));
            }
        }
    }
}
