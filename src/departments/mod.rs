/**
 * Departments
 *
 * Department CRUD: row type, queries and HTTP handlers. Department names
 * are unique; employee create/edit finds-or-creates the named department
 * through `find_or_create`.
 */

pub mod db;
pub mod handlers;

use serde::{Deserialize, Serialize};

/// Department row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Department {
    pub id: i32,
    pub name: String,
}

/// Create/edit payload for a department.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentCreateEdit {
    pub name: String,
}

/// Department representation returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentResponse {
    pub id: i32,
    pub name: String,
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            name: department.name,
        }
    }
}
