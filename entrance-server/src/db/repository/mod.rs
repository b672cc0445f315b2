//! Repository Module
//!
//! Staff persistence goes through the [`StaffStore`] trait so the roster
//! logic runs unchanged against SQLite or the in-memory store. Passes use
//! plain pool functions.

pub mod memory;
pub mod pass;
pub mod staff;

// Re-exports
pub use memory::MemoryStaffStore;
pub use staff::SqliteStaffStore;

use async_trait::async_trait;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{BoothFields, Location, Staff, StaffCreate, StaffUpdate};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::StaffCodeExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Dashboard list filter (query string of `GET /api/staff`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffFilter {
    pub booth_id: Option<String>,
    pub location: Option<Location>,
    pub printed: Option<bool>,
    pub sold: Option<bool>,
    /// Case-insensitive substring over name, code, booth and phone
    pub q: Option<String>,
}

impl StaffFilter {
    /// Same predicate the SQL `WHERE` clause applies
    pub fn matches(&self, staff: &Staff) -> bool {
        if let Some(booth_id) = &self.booth_id
            && staff.booth_id.as_deref() != Some(booth_id.as_str())
        {
            return false;
        }
        if self.location.is_some_and(|loc| loc != staff.location) {
            return false;
        }
        if self.printed.is_some_and(|p| p != staff.printed) {
            return false;
        }
        if self.sold.is_some_and(|s| s != staff.sold) {
            return false;
        }
        match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                [
                    Some(staff.name.as_str()),
                    Some(staff.staff_code.as_str()),
                    staff.booth_id.as_deref(),
                    Some(staff.phone_number.as_str()),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&q))
            }
            _ => true,
        }
    }
}

/// Staff persistence seam used by the allocator upsert, the resizer,
/// the exporter and the HTTP handlers.
///
/// A booth group is every record sharing `(booth_id, location)`;
/// `booth_id = None` groups the records without a booth.
#[async_trait]
pub trait StaffStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Staff>>;

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Staff>>;

    /// Members of a booth group, oldest first
    async fn find_group(&self, booth_id: Option<&str>, location: Location) -> RepoResult<Vec<Staff>>;

    async fn find_by_location(&self, location: Location) -> RepoResult<Vec<Staff>>;

    /// Ordered by location, booth, name, code
    async fn list(&self, filter: &StaffFilter) -> RepoResult<Vec<Staff>>;

    /// Fails with `Duplicate` when the staff code is taken
    async fn create(&self, data: StaffCreate) -> RepoResult<Staff>;

    async fn update(&self, id: i64, data: StaffUpdate) -> RepoResult<Staff>;

    /// Overwrite the shared fields of every member of a group, returns rows affected
    async fn update_group(
        &self,
        booth_id: Option<&str>,
        location: Location,
        fields: &BoothFields,
    ) -> RepoResult<u64>;

    async fn set_qr_path(&self, id: i64, path: &str) -> RepoResult<()>;

    /// Returns `false` when nothing was deleted
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}
