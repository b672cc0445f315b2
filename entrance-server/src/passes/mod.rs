//! Daily passes
//!
//! A pass is one staff member's entry for one day, with its own QR
//! (`pass-{id}`) and an optional photo taken at the gate.

pub mod cleanup;
pub mod photo;

pub use cleanup::cleanup_stale_photos;
pub use photo::{MAX_PHOTO_SIZE, save_photo};

use crate::db::repository::{RepoError, pass};
use crate::qr::{QrError, QrGenerator};
use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{Pass, PassCreate, Staff};
use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Qr(#[from] QrError),

    #[error("Invalid photo: {0}")]
    Photo(String),

    #[error("Photo io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PassError> for AppError {
    fn from(err: PassError) -> Self {
        match err {
            PassError::Repo(e) => e.into(),
            PassError::Qr(e) => e.into(),
            PassError::Photo(msg) => AppError::with_message(ErrorCode::PhotoInvalid, msg),
            PassError::Io(e) => AppError::io(e.to_string()),
        }
    }
}

/// Issue a pass for `staff` on `day` and render its QR
pub async fn check_in(
    pool: &SqlitePool,
    qr: &QrGenerator,
    staff: &Staff,
    day: NaiveDate,
) -> Result<Pass, PassError> {
    if let Some(existing) = pass::find_by_staff(pool, staff.id)
        .await?
        .into_iter()
        .find(|p| p.day_entered == day)
    {
        tracing::debug!(pass_id = existing.id, staff_code = %staff.staff_code, "Already checked in");
        return Ok(existing);
    }

    let mut created = pass::create(
        pool,
        PassCreate {
            full_name: staff.name.clone(),
            phone_number: staff.phone_number.clone(),
            booth_id: staff.booth_id.clone().unwrap_or_default(),
            staff_id: staff.id,
            day_entered: day,
        },
    )
    .await?;
    attach_qr(pool, qr, &mut created).await?;

    tracing::info!(pass_id = created.id, staff_code = %staff.staff_code, day = %day, "Pass issued");
    Ok(created)
}

/// Render the pass QR and record its path on the pass
pub async fn attach_qr(pool: &SqlitePool, qr: &QrGenerator, target: &mut Pass) -> Result<(), PassError> {
    let path = qr.generate(&target.qr_key())?.to_string_lossy().into_owned();
    pass::set_qr_path(pool, target.id, &path).await?;
    target.qr_code_path = Some(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{SqliteStaffStore, StaffStore};
    use shared::models::{Location, StaffCreate, StaffType};

    #[tokio::test]
    async fn test_check_in_creates_pass_with_qr() {
        let tmp = tempfile::tempdir().unwrap();
        let db = DbService::open_in_memory().await.unwrap();
        let store = SqliteStaffStore::new(db.pool.clone());
        let staff = store
            .create(StaffCreate {
                name: "Lee".into(),
                phone_number: "0199".into(),
                booth_id: Some("B7".into()),
                location: Location::Pavilion2,
                staff_type: StaffType::Vip,
                staff_code: "2PV01".into(),
                sold: false,
            })
            .await
            .unwrap();

        let qr = QrGenerator::new(tmp.path());
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let issued = check_in(&db.pool, &qr, &staff, day).await.unwrap();

        assert_eq!(issued.staff_id, staff.id);
        assert_eq!(issued.booth_id, "B7");
        assert_eq!(issued.day_entered, day);
        let qr_path = issued.qr_code_path.clone().unwrap();
        assert!(qr_path.ends_with(&format!("pass-{}.png", issued.id)));

        let stored = pass::find_by_id(&db.pool, issued.id).await.unwrap().unwrap();
        assert_eq!(stored, issued);
        assert_eq!(pass::find_by_staff(&db.pool, staff.id).await.unwrap().len(), 1);

        let again = check_in(&db.pool, &qr, &staff, day).await.unwrap();
        assert_eq!(again.id, issued.id);
        assert_eq!(pass::find_by_staff(&db.pool, staff.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_staff_cascades_to_passes() {
        let tmp = tempfile::tempdir().unwrap();
        let db = DbService::open_in_memory().await.unwrap();
        let store = SqliteStaffStore::new(db.pool.clone());
        let staff = store
            .create(StaffCreate {
                name: "Lee".into(),
                phone_number: "N/A".into(),
                booth_id: None,
                location: Location::Outdoor,
                staff_type: StaffType::Staff,
                staff_code: "OS01".into(),
                sold: false,
            })
            .await
            .unwrap();
        let qr = QrGenerator::new(tmp.path());
        let issued = check_in(&db.pool, &qr, &staff, shared::util::today()).await.unwrap();

        assert!(store.delete(staff.id).await.unwrap());
        assert!(pass::find_by_id(&db.pool, issued.id).await.unwrap().is_none());
    }
}
