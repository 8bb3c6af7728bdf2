//! Table definitions, created on first connection.

use sqlx::sqlite::SqliteConnection;

const CREATE_EMPLOYEES: &str = r#"
    CREATE TABLE IF NOT EXISTS employees (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        name         TEXT NOT NULL,
        position     TEXT,
        salary       REAL DEFAULT 0,
        hours_worked REAL DEFAULT 0
    )
"#;

const CREATE_PROJECTS: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL
    )
"#;

const CREATE_TASKS: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT NOT NULL,
        description TEXT,
        status      TEXT NOT NULL DEFAULT 'in progress'
                    CHECK (status IN ('in progress', 'completed')),
        employee_id INTEGER NULL REFERENCES employees(id),
        project_id  INTEGER NOT NULL REFERENCES projects(id)
    )
"#;

/// Create the three tables if absent. Safe to run on every startup.
pub(crate) async fn init(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for statement in [CREATE_EMPLOYEES, CREATE_PROJECTS, CREATE_TASKS] {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    tracing::info!("schema ensured");
    Ok(())
}
