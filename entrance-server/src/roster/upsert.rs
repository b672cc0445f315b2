//! Cleaned rows → staff store
//!
//! Idempotent on staff code: re-running the same file creates nothing and
//! updates nothing.

use crate::db::repository::{MemoryStaffStore, StaffStore};
use crate::import::CleanedRow;
use crate::qr::{QrGenerator, is_valid_key};
use serde::Serialize;
use shared::models::{Location, Staff, StaffCreate, StaffType, StaffUpdate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errored: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.errored
    }
}

const DEFAULT_NAME: &str = "Unknown";
const DEFAULT_PHONE: &str = "N/A";

pub fn parse_sold(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1" | "sold" | "x"
    )
}

/// Normalised record plus the sold flag when the sheet carries one
fn normalize(row: &CleanedRow, code: &str) -> (StaffCreate, Option<bool>) {
    let trimmed = |s: &str, default: &str| {
        let s = s.trim();
        if s.is_empty() { default.to_string() } else { s.to_string() }
    };
    let booth_id = Some(row.booth_id.trim())
        .filter(|b| !b.is_empty())
        .map(str::to_string);
    let sold = row.sold.as_deref().map(parse_sold);

    let create = StaffCreate {
        name: trimmed(&row.name, DEFAULT_NAME),
        phone_number: trimmed(&row.phone_number, DEFAULT_PHONE),
        booth_id,
        location: Location::normalize(&row.location),
        staff_type: StaffType::normalize(&row.staff_type),
        staff_code: code.to_string(),
        sold: sold.unwrap_or(false),
    };
    (create, sold)
}

/// Changed fields only; empty when the stored record already matches
fn diff(existing: &Staff, incoming: &StaffCreate, sold: Option<bool>) -> StaffUpdate {
    StaffUpdate {
        name: (existing.name != incoming.name).then(|| incoming.name.clone()),
        phone_number: (existing.phone_number != incoming.phone_number)
            .then(|| incoming.phone_number.clone()),
        booth_id: (existing.booth_id != incoming.booth_id).then(|| incoming.booth_id.clone()),
        location: (existing.location != incoming.location).then_some(incoming.location),
        staff_type: (existing.staff_type != incoming.staff_type).then_some(incoming.staff_type),
        printed: None,
        sold: sold.filter(|s| *s != existing.sold),
    }
}

async fn attach_qr<S: StaffStore + ?Sized>(store: &S, qr: &QrGenerator, staff: &Staff) {
    match qr.generate(&staff.staff_code) {
        Ok(path) => {
            if let Err(e) = store.set_qr_path(staff.id, &path.to_string_lossy()).await {
                tracing::warn!(code = %staff.staff_code, error = %e, "Failed to store QR path");
            }
        }
        Err(e) => tracing::warn!(code = %staff.staff_code, error = %e, "QR generation failed"),
    }
}

/// Upsert cleaned rows keyed by staff code.
///
/// Rows without a code are skipped. Codes are kept as written, so a sheet
/// from another scheme round-trips; a code that cannot name a QR file and
/// store failures are counted as errored and the batch carries on.
pub async fn upsert<S: StaffStore + ?Sized>(
    store: &S,
    qr: &QrGenerator,
    rows: &[CleanedRow],
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for (i, row) in rows.iter().enumerate() {
        let code = row.staff_code.trim();
        if code.is_empty() {
            summary.skipped += 1;
            continue;
        }
        if !is_valid_key(code) {
            tracing::warn!(
                row = i + 1,
                code = %code,
                reason = "only letters, digits, '-' and '_' can name a QR file",
                "Unusable staff code, row errored"
            );
            summary.errored += 1;
            continue;
        }
        let (incoming, sold) = normalize(row, code);

        let existing = match store.find_by_code(&incoming.staff_code).await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::error!(code = %incoming.staff_code, error = %e, "Staff lookup failed");
                summary.errored += 1;
                continue;
            }
        };

        match existing {
            Some(existing) => {
                let changes = diff(&existing, &incoming, sold);
                if existing.qr_code_path.is_none() {
                    attach_qr(store, qr, &existing).await;
                }
                if changes.is_empty() {
                    summary.skipped += 1;
                    continue;
                }
                match store.update(existing.id, changes).await {
                    Ok(_) => summary.updated += 1,
                    Err(e) => {
                        tracing::error!(code = %incoming.staff_code, error = %e, "Staff update failed");
                        summary.errored += 1;
                    }
                }
            }
            None => {
                let code = incoming.staff_code.clone();
                match store.create(incoming).await {
                    Ok(created) => {
                        attach_qr(store, qr, &created).await;
                        summary.created += 1;
                    }
                    Err(e) => {
                        tracing::error!(code = %code, error = %e, "Staff create failed");
                        summary.errored += 1;
                    }
                }
            }
        }
    }

    tracing::info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        errored = summary.errored,
        "Staff upsert finished"
    );
    summary
}

/// Upsert into a copy of `existing` and report what would change.
///
/// QR images go to a scratch directory that is removed on return, even
/// when the run fails.
pub async fn dry_run(existing: Vec<Staff>, rows: &[CleanedRow]) -> std::io::Result<ImportSummary> {
    let scratch = tempfile::Builder::new().prefix("entrance-dry-run-").tempdir()?;
    let store = MemoryStaffStore::with_staff(existing);
    Ok(upsert(&store, &QrGenerator::new(scratch.path()), rows).await)
}
