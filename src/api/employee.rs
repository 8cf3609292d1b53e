use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::model::employee::Employee;
use crate::store::mysql::MySqlEmployeeDirectory;
use crate::store::{EmployeeDirectory, EmployeePage};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Backend Developer")]
    pub position: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Free-text search over name, email, department, position and code.
    pub search: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub employee_code: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "message": "Employee created successfully"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn create_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let result = sqlx::query(
        r#"
        INSERT INTO employees (employee_code, name, email, department, position, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, NOW(), NOW())
        "#,
    )
    .bind(&payload.employee_code)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.department)
    .bind(&payload.position)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Created().json(json!({
            "message": "Employee created successfully"
        }))),
        Err(e) => {
            error!(error = %e, "Failed to create employee");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, contact the system admin"
            })))
        }
    }
}

/// Paginated roster listing
#[utoipa::path(
    get,
    path = "/api/employee",
    params(
        ("page", Query, description = "Page number"),
        ("per_page", Query, description = "Items per page"),
        ("search", Query, description = "Search by name, email, department, position or code")
    ),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeePage),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(
    directory: web::Data<MySqlEmployeeDirectory>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);

    debug!(page, per_page, search = ?query.search, "Fetching employees");

    let result = directory
        .page(page, per_page, query.search.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch employees");
            ErrorInternalServerError("Database error")
        })?;

    Ok(HttpResponse::Ok().json(result))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_code, name, email, department, position, created_at, updated_at
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch employee");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Update Employee (partial)
#[utoipa::path(
    put,
    path = "/api/employee/{id}",
    params(("id", Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Object, example = json!({
            "message": "Employee updated successfully"
        })),
        (status = 400, description = "No fields provided"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let employee_id = path.into_inner();

    let mut sets: Vec<&str> = Vec::new();
    let mut binds: Vec<&String> = Vec::new();

    if let Some(v) = &payload.employee_code {
        sets.push("employee_code = ?");
        binds.push(v);
    }
    if let Some(v) = &payload.name {
        sets.push("name = ?");
        binds.push(v);
    }
    if let Some(v) = &payload.email {
        sets.push("email = ?");
        binds.push(v);
    }
    if let Some(v) = &payload.department {
        sets.push("department = ?");
        binds.push(v);
    }
    if let Some(v) = &payload.position {
        sets.push("position = ?");
        binds.push(v);
    }

    if sets.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "No fields provided for update"
        })));
    }

    sets.push("updated_at = NOW()");
    let sql = format!("UPDATE employees SET {} WHERE id = ?", sets.join(", "));
    debug!(sql = %sql, employee_id, "Updating employee");

    let mut update = sqlx::query(&sql);
    for bind in binds {
        update = update.bind(bind);
    }

    let result = update
        .bind(employee_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to update employee");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee updated successfully"
    })))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn delete_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let employee_id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return Ok(HttpResponse::NotFound().json(json!({
                    "message": "Employee not found"
                })));
            }

            Ok(HttpResponse::Ok().json(json!({
                "message": "Successfully deleted"
            })))
        }
        Err(e) => {
            error!(error = %e, employee_id, "Failed to delete employee");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}
