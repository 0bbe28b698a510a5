/**
 * Employee Database Operations
 *
 * All queries touching the employees table, including the lockout
 * counter updates. The failed-attempt increment is a single UPDATE so
 * concurrent failures against one account never lose an update; row-level
 * locking in Postgres serializes the read-modify-write.
 */

use sqlx::PgPool;

use crate::employees::types::{Employee, EmployeeDetail, EmployeeProjection, Role};

const DETAIL_COLUMNS: &str = r#"
    e.id, e.first_name, e.last_name, e.position, e.salary,
    d.id AS department_id, d.name AS department_name
"#;

/// Insert payload for a new employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub position: String,
    pub role: Role,
    pub salary: f64,
    pub department_id: i32,
}

/// Look up the full employee row (account fields included) by username.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, first_name, last_name, email, username, password_hash, position,
               role, salary, department_id, locked, failed_attempts, created_at, updated_at
        FROM employees
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn exists_by_username(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM employees WHERE username = $1)")
        .bind(username)
        .fetch_one(pool)
        .await
}

pub async fn exists_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM employees WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await
}

/// Insert an employee and return its id.
pub async fn create(pool: &PgPool, new: NewEmployee) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO employees
            (first_name, last_name, email, username, password_hash, position, role, salary, department_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(&new.username)
    .bind(&new.password_hash)
    .bind(&new.position)
    .bind(new.role.as_str())
    .bind(new.salary)
    .bind(new.department_id)
    .fetch_one(pool)
    .await
}

/// Update the directory fields of an existing employee.
///
/// Returns `false` if no row matched the id. Credentials other than the
/// password hash are not editable here; username and email stay unique
/// keys of the account.
pub async fn update(pool: &PgPool, id: i64, new: NewEmployee) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE employees
        SET first_name = $2, last_name = $3, email = $4, username = $5,
            password_hash = $6, position = $7, role = $8, salary = $9,
            department_id = $10, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(&new.username)
    .bind(&new.password_hash)
    .bind(&new.position)
    .bind(new.role.as_str())
    .bind(new.salary)
    .bind(new.department_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Employee joined with its department, for responses.
pub async fn detail_by_id(pool: &PgPool, id: i64) -> Result<Option<EmployeeDetail>, sqlx::Error> {
    sqlx::query_as::<_, EmployeeDetail>(&format!(
        r#"
        SELECT {DETAIL_COLUMNS}
        FROM employees e
        JOIN departments d ON d.id = e.department_id
        WHERE e.id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// One page of employees ordered by id.
pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<EmployeeDetail>, sqlx::Error> {
    sqlx::query_as::<_, EmployeeDetail>(&format!(
        r#"
        SELECT {DETAIL_COLUMNS}
        FROM employees e
        JOIN departments d ON d.id = e.department_id
        ORDER BY e.id
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await
}

/// Full-name/department projection of every employee.
pub async fn projections(pool: &PgPool) -> Result<Vec<EmployeeProjection>, sqlx::Error> {
    sqlx::query_as::<_, EmployeeProjection>(
        r#"
        SELECT e.first_name || ' ' || e.last_name AS full_name,
               e.position,
               d.name AS department
        FROM employees e
        JOIN departments d ON d.id = e.department_id
        ORDER BY e.id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Atomically record a failed sign-in and return the new counter value.
pub async fn record_failed_attempt(pool: &PgPool, username: &str) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE employees
        SET failed_attempts = failed_attempts + 1, updated_at = now()
        WHERE username = $1
        RETURNING failed_attempts
        "#,
    )
    .bind(username)
    .fetch_one(pool)
    .await
}

/// Set the lock flag after the lockout policy hit the threshold.
pub async fn lock_account(pool: &PgPool, username: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE employees SET locked = TRUE, updated_at = now() WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await?;
    Ok(())
}

/// Reset the failed-attempt counter after a successful sign-in.
pub async fn reset_failed_attempts(pool: &PgPool, username: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE employees SET failed_attempts = 0, updated_at = now() WHERE username = $1",
    )
    .bind(username)
    .execute(pool)
    .await?;
    Ok(())
}

/// Lock flag for the admin block endpoints.
pub async fn locked_flag(pool: &PgPool, id: i64) -> Result<Option<bool>, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT locked FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Administrative block/unblock. Unblocking also clears the counter so
/// the account starts over in the OPEN state.
pub async fn set_locked(pool: &PgPool, id: i64, locked: bool) -> Result<Option<bool>, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        UPDATE employees
        SET locked = $2,
            failed_attempts = CASE WHEN $2 THEN failed_attempts ELSE 0 END,
            updated_at = now()
        WHERE id = $1
        RETURNING locked
        "#,
    )
    .bind(id)
    .bind(locked)
    .fetch_optional(pool)
    .await
}
