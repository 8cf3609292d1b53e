use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_code": "EMP-001",
        "name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering",
        "position": "Backend Developer",
        "created_at": "2024-01-01T09:00:00",
        "updated_at": "2024-01-01T09:00:00"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    /// Externally assigned employee id, distinct from the database key.
    #[schema(example = "EMP-001")]
    pub employee_code: String,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "Backend Developer")]
    pub position: String,

    #[schema(example = "2024-01-01T09:00:00", value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,

    #[schema(example = "2024-01-01T09:00:00", value_type = String, format = "date-time")]
    pub updated_at: NaiveDateTime,
}
