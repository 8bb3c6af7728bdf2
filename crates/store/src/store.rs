//! Synchronous store facade.

use tokio::runtime::{Builder, Runtime};

use worktrack_core::{EmployeeId, Entity, ProjectId, TaskId};
use worktrack_projects::{Project, Task};
use worktrack_staff::Employee;

use crate::config::StoreConfig;
use crate::connection::LazyConnection;
use crate::error::{StoreError, StoreResult};
use crate::{employees, projects, tasks};

/// SQLite-backed store for employees, projects and tasks.
///
/// Every call runs to completion on the calling thread. The single connection
/// is opened on first use and reused until [`WorkStore::close`] or drop.
/// After `close`, the next operation opens a fresh connection.
#[derive(Debug)]
pub struct WorkStore {
    runtime: Runtime,
    connection: LazyConnection,
}

impl WorkStore {
    /// Create a store for `config`. No connection is made until the first operation.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StoreError::Runtime)?;

        Ok(Self {
            runtime,
            connection: LazyConnection::new(config),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        self.connection.config()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_open()
    }

    /// Open the connection and ensure the schema now rather than on first use.
    pub fn init(&mut self) -> StoreResult<()> {
        self.connection.acquire(&self.runtime)?;
        Ok(())
    }

    /// Release the connection. Calling it again (or on a never-used store) is a no-op.
    pub fn close(&mut self) -> StoreResult<()> {
        self.connection.release(&self.runtime)?;
        Ok(())
    }

    // ==================== Employees ====================

    /// Insert a new employee and record the generated id on it.
    pub fn add_employee(&mut self, employee: &mut Employee) -> StoreResult<EmployeeId> {
        ensure_new(employee, "employee")?;
        let conn = self.connection.acquire(&self.runtime)?;
        let id = self.runtime.block_on(employees::insert(conn, employee))?;
        employee.assign_id(id);
        tracing::debug!(employee_id = %id, "employee added");
        Ok(id)
    }

    /// Overwrite the stored employee. Returns `false` if no row has its id.
    pub fn update_employee(&mut self, employee: &Employee) -> StoreResult<bool> {
        let id = require_id(employee, "employee")?;
        let conn = self.connection.acquire(&self.runtime)?;
        let updated = self.runtime.block_on(employees::update(conn, id, employee))?;
        log_write("employee", "update", id, updated);
        Ok(updated)
    }

    /// Delete the employee; their tasks stay, unassigned.
    pub fn delete_employee(&mut self, id: EmployeeId) -> StoreResult<bool> {
        let conn = self.connection.acquire(&self.runtime)?;
        let removed = self.runtime.block_on(employees::delete(conn, id))?;
        log_write("employee", "delete", id, removed);
        Ok(removed)
    }

    pub fn get_all_employees(&mut self) -> StoreResult<Vec<Employee>> {
        let conn = self.connection.acquire(&self.runtime)?;
        self.runtime.block_on(employees::all(conn))
    }

    pub fn get_employee_by_id(&mut self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        let conn = self.connection.acquire(&self.runtime)?;
        self.runtime.block_on(employees::by_id(conn, id))
    }

    // ==================== Projects ====================

    pub fn add_project(&mut self, project: &mut Project) -> StoreResult<ProjectId> {
        ensure_new(project, "project")?;
        let conn = self.connection.acquire(&self.runtime)?;
        let id = self.runtime.block_on(projects::insert(conn, project))?;
        project.assign_id(id);
        tracing::debug!(project_id = %id, "project added");
        Ok(id)
    }

    /// Overwrite the stored title. The in-memory task list is not written.
    pub fn update_project(&mut self, project: &Project) -> StoreResult<bool> {
        let id = require_id(project, "project")?;
        let conn = self.connection.acquire(&self.runtime)?;
        let updated = self.runtime.block_on(projects::update(conn, id, project))?;
        log_write("project", "update", id, updated);
        Ok(updated)
    }

    /// Delete the project together with all of its tasks. Irreversible.
    pub fn delete_project(&mut self, id: ProjectId) -> StoreResult<bool> {
        let conn = self.connection.acquire(&self.runtime)?;
        let removed = self.runtime.block_on(projects::delete(conn, id))?;
        log_write("project", "delete", id, removed);
        Ok(removed)
    }

    /// All projects, each with its tasks loaded.
    pub fn get_all_projects(&mut self) -> StoreResult<Vec<Project>> {
        let conn = self.connection.acquire(&self.runtime)?;
        self.runtime.block_on(projects::all(conn))
    }

    pub fn get_project_by_id(&mut self, id: ProjectId) -> StoreResult<Option<Project>> {
        let conn = self.connection.acquire(&self.runtime)?;
        self.runtime.block_on(projects::by_id(conn, id))
    }

    // ==================== Tasks ====================

    pub fn add_task(&mut self, task: &mut Task) -> StoreResult<TaskId> {
        ensure_new(task, "task")?;
        let conn = self.connection.acquire(&self.runtime)?;
        let id = self.runtime.block_on(tasks::insert(conn, task))?;
        task.assign_id(id);
        tracing::debug!(task_id = %id, project_id = %task.project_id(), "task added");
        Ok(id)
    }

    pub fn update_task(&mut self, task: &Task) -> StoreResult<bool> {
        let id = require_id(task, "task")?;
        let conn = self.connection.acquire(&self.runtime)?;
        let updated = self.runtime.block_on(tasks::update(conn, id, task))?;
        log_write("task", "update", id, updated);
        Ok(updated)
    }

    pub fn delete_task(&mut self, id: TaskId) -> StoreResult<bool> {
        let conn = self.connection.acquire(&self.runtime)?;
        let removed = self.runtime.block_on(tasks::delete(conn, id))?;
        log_write("task", "delete", id, removed);
        Ok(removed)
    }

    pub fn get_all_tasks(&mut self) -> StoreResult<Vec<Task>> {
        let conn = self.connection.acquire(&self.runtime)?;
        self.runtime.block_on(tasks::all(conn))
    }

    pub fn get_task_by_id(&mut self, id: TaskId) -> StoreResult<Option<Task>> {
        let conn = self.connection.acquire(&self.runtime)?;
        self.runtime.block_on(tasks::by_id(conn, id))
    }

    pub fn get_tasks_by_project(&mut self, project_id: ProjectId) -> StoreResult<Vec<Task>> {
        let conn = self.connection.acquire(&self.runtime)?;
        self.runtime.block_on(tasks::by_project(conn, project_id))
    }

    /// Load the employee a task is assigned to, if any.
    pub fn get_task_assignee(&mut self, task: &Task) -> StoreResult<Option<Employee>> {
        match task.assignee() {
            Some(employee_id) => self.get_employee_by_id(employee_id),
            None => Ok(None),
        }
    }
}

impl Drop for WorkStore {
    fn drop(&mut self) {
        if let Err(err) = self.connection.release(&self.runtime) {
            tracing::error!("failed to close database connection on drop: {err:?}");
        }
    }
}

fn ensure_new<E>(entity: &E, kind: &'static str) -> StoreResult<()>
where
    E: Entity,
    E::Id: Into<i64>,
{
    match entity.id() {
        Some(id) => Err(StoreError::AlreadyPersisted {
            kind,
            id: id.into(),
        }),
        None => Ok(()),
    }
}

fn require_id<E: Entity>(entity: &E, kind: &'static str) -> StoreResult<E::Id> {
    entity.id().ok_or(StoreError::MissingId { kind })
}

fn log_write(kind: &str, action: &str, id: impl core::fmt::Display, affected: bool) {
    if affected {
        tracing::debug!(%id, "{kind} {action} applied");
    } else {
        tracing::warn!(%id, "{kind} {action} matched no row");
    }
}
