use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::StreamExt;
use sqlx::MySqlPool;

use crate::errors::StoreError;
use crate::model::attendance::{AttendanceStatus, DailyRecord};
use crate::model::employee::Employee;
use crate::store::{AttendanceStore, EmployeeDirectory, EmployeePage};

const SEARCH_CLAUSE: &str =
    "WHERE name LIKE ? OR email LIKE ? OR department LIKE ? OR position LIKE ? OR employee_code LIKE ?";

#[derive(Clone)]
pub struct MySqlEmployeeDirectory {
    pool: MySqlPool,
}

impl MySqlEmployeeDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeDirectory for MySqlEmployeeDirectory {
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_code, name, email, department, position, created_at, updated_at
            FROM employees
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn page(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<EmployeePage, StoreError> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);
        let offset = (page - 1) * per_page;

        let like = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));
        let where_clause = if like.is_some() { SEARCH_CLAUSE } else { "" };

        let count_sql = format!("SELECT COUNT(*) FROM employees {where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(like) = &like {
            for _ in 0..5 {
                count_query = count_query.bind(like);
            }
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let data_sql = format!(
            "SELECT id, employee_code, name, email, department, position, created_at, updated_at \
             FROM employees {where_clause} ORDER BY name LIMIT ? OFFSET ?"
        );
        let mut data_query = sqlx::query_as::<_, Employee>(&data_sql);
        if let Some(like) = &like {
            for _ in 0..5 {
                data_query = data_query.bind(like);
            }
        }
        let data = data_query
            .bind(per_page as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(EmployeePage {
            data,
            page,
            per_page,
            total,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    date: NaiveDate,
    employee_id: u64,
    status: String,
}

fn parse_status(employee_id: u64, status: String) -> Result<AttendanceStatus, StoreError> {
    status
        .parse()
        .map_err(|_| StoreError::InvalidStatus {
            employee_id,
            status,
        })
}

#[derive(Clone)]
pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn get_by_date(&self, date: NaiveDate) -> Result<DailyRecord, StoreError> {
        let rows = sqlx::query_as::<_, (u64, String)>(
            "SELECT employee_id, status FROM attendance WHERE date = ?",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        let mut record = DailyRecord::with_capacity(rows.len());
        for (employee_id, status) in rows {
            record.insert(employee_id, parse_status(employee_id, status)?);
        }
        Ok(record)
    }

    async fn set_by_date(&self, date: NaiveDate, record: &DailyRecord) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        // Stable statement order keeps concurrent merge writes from
        // deadlocking on row locks.
        let mut entries: Vec<_> = record.iter().collect();
        entries.sort_by_key(|(employee_id, _)| **employee_id);

        for (employee_id, status) in entries {
            sqlx::query(
                r#"
                INSERT INTO attendance (date, employee_id, status)
                VALUES (?, ?, ?)
                ON DUPLICATE KEY UPDATE status = VALUES(status)
                "#,
            )
            .bind(date)
            .bind(employee_id)
            .bind(status.to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<NaiveDate, DailyRecord>, StoreError> {
        let mut stream = sqlx::query_as::<_, AttendanceRow>(
            "SELECT date, employee_id, status FROM attendance WHERE date BETWEEN ? AND ?",
        )
        .bind(start)
        .bind(end)
        .fetch(&self.pool);

        let mut by_date: HashMap<NaiveDate, DailyRecord> = HashMap::new();
        while let Some(row) = stream.next().await {
            let row = row?;
            let status = parse_status(row.employee_id, row.status)?;
            by_date
                .entry(row.date)
                .or_default()
                .insert(row.employee_id, status);
        }

        Ok(by_date)
    }
}
