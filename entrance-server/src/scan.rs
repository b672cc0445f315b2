//! Gate scan
//!
//! A scanned payload is either a pass key (`pass-42`) or a staff code.
//! Staff codes are looked up as stored, so imported codes outside the
//! `1PV01` scheme still scan. Text that could never label a QR is reported
//! as invalid, never as an error.

use crate::db::repository::{RepoResult, StaffStore, pass};
use crate::qr::is_valid_key;
use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{Location, StaffType, parse_pass_key};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffBadge {
    pub id: i64,
    pub name: String,
    pub staff_code: String,
    pub staff_type: StaffType,
    pub location: Location,
    pub location_label: &'static str,
    pub booth_id: Option<String>,
    pub phone_number: String,
    pub printed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassBadge {
    pub id: i64,
    pub full_name: String,
    pub booth_id: String,
    pub staff_id: i64,
    pub day_entered: NaiveDate,
    pub has_photo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanResult {
    Valid(Badge),
    NotFound { payload: String },
    Invalid { payload: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Badge {
    Staff(StaffBadge),
    Pass(PassBadge),
}

impl ScanResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ScanResult::Valid(_))
    }
}

/// Resolve a scanned payload
pub async fn verify<S: StaffStore + ?Sized>(
    store: &S,
    pool: &SqlitePool,
    payload: &str,
) -> RepoResult<ScanResult> {
    let payload = payload.trim();

    if let Some(pass_id) = parse_pass_key(payload) {
        let result = match pass::find_by_id(pool, pass_id).await? {
            Some(p) => ScanResult::Valid(Badge::Pass(PassBadge {
                id: p.id,
                full_name: p.full_name,
                booth_id: p.booth_id,
                staff_id: p.staff_id,
                day_entered: p.day_entered,
                has_photo: p.photo_path.is_some(),
            })),
            None => ScanResult::NotFound { payload: payload.to_string() },
        };
        tracing::info!(payload = %payload, valid = result.is_valid(), "Pass scanned");
        return Ok(result);
    }

    if is_valid_key(payload) {
        let result = match store.find_by_code(payload).await? {
            Some(s) => ScanResult::Valid(Badge::Staff(StaffBadge {
                id: s.id,
                location_label: s.location.label(),
                name: s.name,
                staff_code: s.staff_code,
                staff_type: s.staff_type,
                location: s.location,
                booth_id: s.booth_id,
                phone_number: s.phone_number,
                printed: s.printed,
            })),
            None => ScanResult::NotFound { payload: payload.to_string() },
        };
        tracing::info!(payload = %payload, valid = result.is_valid(), "Staff code scanned");
        return Ok(result);
    }

    tracing::warn!(payload = %payload, "Malformed scan payload");
    Ok(ScanResult::Invalid { payload: payload.to_string() })
}
