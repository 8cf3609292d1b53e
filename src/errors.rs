use derive_more::{Display, Error};

/// Invalid caller-supplied arguments. Never retried, always fatal to the call.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ReportError {
    #[display(fmt = "month must be between 1 and 12, got {}", _0)]
    InvalidMonth(#[error(not(source))] u32),
}

/// Collaborator (database) read/write failures. Surfaced unchanged to the
/// caller; in-memory working state is left intact so the operation can be
/// retried.
#[derive(Debug, Display, Error)]
pub enum StoreError {
    #[display(fmt = "database error: {}", _0)]
    Database(#[error(source)] sqlx::Error),

    #[display(fmt = "unknown attendance status {:?} stored for employee {}", status, employee_id)]
    InvalidStatus {
        employee_id: u64,
        #[error(not(source))]
        status: String,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}
