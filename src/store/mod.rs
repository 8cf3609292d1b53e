//! Narrow interfaces over the persistence collaborators. Handlers receive
//! concrete store objects through actix app data; the report and session
//! layers only ever see these traits.

pub mod mysql;

#[cfg(test)]
pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::StoreError;
use crate::model::attendance::DailyRecord;
use crate::model::employee::Employee;

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeePage {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 42)]
    pub total: i64,
}

#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Full roster, ordered by display name.
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError>;

    /// One page of the roster, optionally narrowed by a free-text search over
    /// name, email, department, position and employee code.
    async fn page(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<EmployeePage, StoreError>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// The sparse record for one date; empty map if the date was never saved.
    async fn get_by_date(&self, date: NaiveDate) -> Result<DailyRecord, StoreError>;

    /// Merge-writes `record` into the date's stored record. Employee entries
    /// already persisted for the date but absent from `record` are kept.
    async fn set_by_date(&self, date: NaiveDate, record: &DailyRecord) -> Result<(), StoreError>;

    /// All saved records with `start <= date <= end`, keyed by date.
    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<NaiveDate, DailyRecord>, StoreError>;
}
