//! Employee rows.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

use worktrack_core::EmployeeId;
use worktrack_staff::Employee;

use crate::error::{StoreError, StoreResult};

const SELECT_EMPLOYEE: &str = r#"
    SELECT id, name, position,
           CAST(salary AS REAL) AS salary,
           CAST(hours_worked AS REAL) AS hours_worked
    FROM employees
"#;

pub(crate) async fn insert(conn: &mut SqliteConnection, employee: &Employee) -> StoreResult<EmployeeId> {
    let result = sqlx::query(
        r#"
        INSERT INTO employees (name, position, salary, hours_worked)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(employee.name())
    .bind(employee.position())
    .bind(employee.salary())
    .bind(employee.hours_worked())
    .execute(&mut *conn)
    .await?;

    Ok(EmployeeId::new(result.last_insert_rowid()))
}

pub(crate) async fn update(
    conn: &mut SqliteConnection,
    id: EmployeeId,
    employee: &Employee,
) -> StoreResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE employees
        SET name = ?1, position = ?2, salary = ?3, hours_worked = ?4
        WHERE id = ?5
        "#,
    )
    .bind(employee.name())
    .bind(employee.position())
    .bind(employee.salary())
    .bind(employee.hours_worked())
    .bind(id.get())
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Null the assignee of the employee's tasks, then remove the employee, atomically.
pub(crate) async fn delete(conn: &mut SqliteConnection, id: EmployeeId) -> StoreResult<bool> {
    let mut tx = conn.begin().await?;

    let released = sqlx::query("UPDATE tasks SET employee_id = NULL WHERE employee_id = ?1")
        .bind(id.get())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removed = sqlx::query("DELETE FROM employees WHERE id = ?1")
        .bind(id.get())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    tracing::debug!(employee_id = %id, released_tasks = released, "employee delete committed");
    Ok(removed > 0)
}

pub(crate) async fn all(conn: &mut SqliteConnection) -> StoreResult<Vec<Employee>> {
    let rows = sqlx::query(&format!("{SELECT_EMPLOYEE} ORDER BY id"))
        .fetch_all(&mut *conn)
        .await?;

    rows.iter().map(from_row).collect()
}

pub(crate) async fn by_id(conn: &mut SqliteConnection, id: EmployeeId) -> StoreResult<Option<Employee>> {
    let row = sqlx::query(&format!("{SELECT_EMPLOYEE} WHERE id = ?1"))
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(from_row).transpose()
}

fn from_row(row: &SqliteRow) -> StoreResult<Employee> {
    let id: i64 = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let position: Option<String> = row.try_get("position")?;
    let salary: Option<f64> = row.try_get("salary")?;
    let hours_worked: Option<f64> = row.try_get("hours_worked")?;

    Employee::restore(
        EmployeeId::new(id),
        name,
        position.unwrap_or_default(),
        salary.unwrap_or(0.0),
        hours_worked.unwrap_or(0.0),
    )
    .map_err(|err| StoreError::corrupt_row("employees", id, err))
}
