//! Task rows.

use sqlx::Row;
use sqlx::sqlite::{SqliteConnection, SqliteRow};

use worktrack_core::{EmployeeId, ProjectId, TaskId};
use worktrack_projects::{Task, TaskStatus};

use crate::error::{StoreError, StoreResult};

const SELECT_TASK: &str = r#"
    SELECT id, title, description, status, employee_id, project_id
    FROM tasks
"#;

pub(crate) async fn insert(conn: &mut SqliteConnection, task: &Task) -> StoreResult<TaskId> {
    let result = sqlx::query(
        r#"
        INSERT INTO tasks (title, description, status, employee_id, project_id)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(task.title())
    .bind(task.description())
    .bind(task.status().as_str())
    .bind(task.assignee().map(EmployeeId::get))
    .bind(task.project_id().get())
    .execute(&mut *conn)
    .await?;

    Ok(TaskId::new(result.last_insert_rowid()))
}

pub(crate) async fn update(conn: &mut SqliteConnection, id: TaskId, task: &Task) -> StoreResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET title = ?1, description = ?2, status = ?3, employee_id = ?4, project_id = ?5
        WHERE id = ?6
        "#,
    )
    .bind(task.title())
    .bind(task.description())
    .bind(task.status().as_str())
    .bind(task.assignee().map(EmployeeId::get))
    .bind(task.project_id().get())
    .bind(id.get())
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn delete(conn: &mut SqliteConnection, id: TaskId) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
        .bind(id.get())
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn all(conn: &mut SqliteConnection) -> StoreResult<Vec<Task>> {
    let rows = sqlx::query(&format!("{SELECT_TASK} ORDER BY id"))
        .fetch_all(&mut *conn)
        .await?;

    rows.iter().map(from_row).collect()
}

pub(crate) async fn by_id(conn: &mut SqliteConnection, id: TaskId) -> StoreResult<Option<Task>> {
    let row = sqlx::query(&format!("{SELECT_TASK} WHERE id = ?1"))
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(from_row).transpose()
}

pub(crate) async fn by_project(conn: &mut SqliteConnection, project_id: ProjectId) -> StoreResult<Vec<Task>> {
    let rows = sqlx::query(&format!("{SELECT_TASK} WHERE project_id = ?1 ORDER BY id"))
        .bind(project_id.get())
        .fetch_all(&mut *conn)
        .await?;

    rows.iter().map(from_row).collect()
}

fn from_row(row: &SqliteRow) -> StoreResult<Task> {
    let id: i64 = row.try_get("id")?;
    let title: String = row.try_get("title")?;
    let description: Option<String> = row.try_get("description")?;
    let status: Option<String> = row.try_get("status")?;
    let employee_id: Option<i64> = row.try_get("employee_id")?;
    let project_id: i64 = row.try_get("project_id")?;

    let status = match status.as_deref() {
        None => TaskStatus::default(),
        Some(raw) => raw
            .parse::<TaskStatus>()
            .map_err(|err| StoreError::corrupt_row("tasks", id, err))?,
    };

    Task::restore(
        TaskId::new(id),
        title,
        description.unwrap_or_default(),
        status,
        employee_id.map(EmployeeId::new),
        ProjectId::new(project_id),
    )
    .map_err(|err| StoreError::corrupt_row("tasks", id, err))
}
