/**
 * Department Database Operations
 */

use sqlx::PgPool;

use crate::departments::Department;

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>("SELECT id, name FROM departments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM departments WHERE name = $1)")
        .bind(name)
        .fetch_one(pool)
        .await
}

/// Resolve a department by name, creating it if absent.
///
/// Single upsert statement so two concurrent employee creates naming the
/// same new department race safely.
pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Department, sqlx::Error> {
    sqlx::query_as::<_, Department>(
        r#"
        INSERT INTO departments (name)
        VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn create(pool: &PgPool, name: &str) -> Result<Department, sqlx::Error> {
    sqlx::query_as::<_, Department>("INSERT INTO departments (name) VALUES ($1) RETURNING id, name")
        .bind(name)
        .fetch_one(pool)
        .await
}

/// Rename a department. Returns the updated row, or `None` if the id is
/// unknown.
pub async fn update(pool: &PgPool, id: i32, name: &str) -> Result<Option<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>(
        "UPDATE departments SET name = $2 WHERE id = $1 RETURNING id, name",
    )
    .bind(id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM departments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>(
        "SELECT id, name FROM departments ORDER BY id LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments")
        .fetch_one(pool)
        .await
}
