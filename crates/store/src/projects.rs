//! Project rows. Reads attach the project's tasks.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

use worktrack_core::{Entity, ProjectId};
use worktrack_projects::Project;

use crate::error::{StoreError, StoreResult};
use crate::tasks;

pub(crate) async fn insert(conn: &mut SqliteConnection, project: &Project) -> StoreResult<ProjectId> {
    let result = sqlx::query("INSERT INTO projects (title) VALUES (?1)")
        .bind(project.title())
        .execute(&mut *conn)
        .await?;

    Ok(ProjectId::new(result.last_insert_rowid()))
}

pub(crate) async fn update(conn: &mut SqliteConnection, id: ProjectId, project: &Project) -> StoreResult<bool> {
    let result = sqlx::query("UPDATE projects SET title = ?1 WHERE id = ?2")
        .bind(project.title())
        .bind(id.get())
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove the project's tasks, then the project, atomically.
pub(crate) async fn delete(conn: &mut SqliteConnection, id: ProjectId) -> StoreResult<bool> {
    let mut tx = conn.begin().await?;

    let removed_tasks = sqlx::query("DELETE FROM tasks WHERE project_id = ?1")
        .bind(id.get())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removed = sqlx::query("DELETE FROM projects WHERE id = ?1")
        .bind(id.get())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    tracing::debug!(project_id = %id, removed_tasks, "project delete committed");
    Ok(removed > 0)
}

/// Every project with its tasks: one query for projects, one per project for tasks.
pub(crate) async fn all(conn: &mut SqliteConnection) -> StoreResult<Vec<Project>> {
    let rows = sqlx::query("SELECT id, title FROM projects ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;

    let mut projects = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut project = from_row(row)?;
        attach_tasks(conn, &mut project).await?;
        projects.push(project);
    }
    Ok(projects)
}

pub(crate) async fn by_id(conn: &mut SqliteConnection, id: ProjectId) -> StoreResult<Option<Project>> {
    let row = sqlx::query("SELECT id, title FROM projects WHERE id = ?1")
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut project = from_row(&row)?;
    attach_tasks(conn, &mut project).await?;
    Ok(Some(project))
}

async fn attach_tasks(conn: &mut SqliteConnection, project: &mut Project) -> StoreResult<()> {
    if let Some(id) = project.id() {
        let project_tasks = tasks::by_project(conn, id).await?;
        project.set_tasks(project_tasks);
    }
    Ok(())
}

fn from_row(row: &SqliteRow) -> StoreResult<Project> {
    let id: i64 = row.try_get("id")?;
    let title: String = row.try_get("title")?;

    Project::restore(ProjectId::new(id), title).map_err(|err| StoreError::corrupt_row("projects", id, err))
}
