//! Booth roster
//!
//! - [`allocator`] - 批量分配 staff code (纯函数)
//! - [`upsert`] - cleaned rows → store, idempotent on staff code
//! - [`resize`] - 编辑展位共享字段并调整人数

pub mod allocator;
pub mod resize;
pub mod upsert;

pub use allocator::{AllocatedStaff, Allocation, BoothRow, RowSkip, SequenceCounters, SkipReason, allocate};
pub use resize::{ResizeOutcome, parse_count, resize};
pub use upsert::{ImportSummary, dry_run, upsert};

use crate::db::repository::{RepoError, StaffStore};
use crate::qr::QrError;
use shared::error::AppError;
use shared::models::{Location, StaffCode, StaffType, location_prefix};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Staff {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Qr(#[from] QrError),
}

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::NotFound(id) => AppError::staff_not_found(id),
            RosterError::Repo(e) => e.into(),
            RosterError::Qr(e) => e.into(),
        }
    }
}

/// Next free staff code for a record created outside an allocator batch.
///
/// Continues after the highest sequence stored under the location's prefix,
/// skipping any code that is already taken elsewhere.
pub async fn next_code<S: StaffStore + ?Sized>(
    store: &S,
    location: Location,
    staff_type: StaffType,
) -> Result<StaffCode, RepoError> {
    let prefix = location_prefix(location.token());
    let last = store
        .find_by_location(location)
        .await?
        .iter()
        .filter_map(|s| StaffCode::parse(&s.staff_code))
        .filter(|code| code.prefix() == prefix)
        .map(|code| code.sequence())
        .max()
        .unwrap_or(0);

    let exhausted = || RepoError::Validation(format!("staff code sequence exhausted for prefix {prefix}"));
    let mut sequence = last.checked_add(1).ok_or_else(exhausted)?;
    loop {
        let code = StaffCode::new(&prefix, staff_type, sequence);
        if store.find_by_code(code.as_str()).await?.is_none() {
            return Ok(code);
        }
        sequence = sequence.checked_add(1).ok_or_else(exhausted)?;
    }
}
