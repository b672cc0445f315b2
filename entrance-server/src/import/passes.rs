//! Pass sheet import
//!
//! Columns: `full_name, phone_number, booth_id, staff_code | staff_name,
//! day_entered (YYYY-MM-DD)`. A staff member gets at most one pass per day.

use super::columns::HeaderIndex;
use super::{ImportError, Table};
use crate::db::repository::{SqliteStaffStore, StaffStore, pass};
use crate::passes::attach_qr;
use crate::qr::QrGenerator;
use crate::roster::ImportSummary;
use chrono::NaiveDate;
use shared::models::{PassCreate, Staff};

const FULL_NAME: &[&str] = &["full name", "name"];
const PHONE: &[&str] = &["phone number", "phone no", "phone"];
const BOOTH: &[&str] = &["booth id", "booth"];
const STAFF_CODE: &[&str] = &["staff code", "code"];
const STAFF_NAME: &[&str] = &["staff name"];
const DAY: &[&str] = &["day entered", "date"];

struct PassColumns {
    full_name: Option<usize>,
    phone: Option<usize>,
    booth: Option<usize>,
    staff_code: Option<usize>,
    staff_name: Option<usize>,
    day: Option<usize>,
}

fn cell(row: &[String], pos: Option<usize>) -> &str {
    pos.and_then(|p| row.get(p)).map(|s| s.trim()).unwrap_or("")
}

/// Blank → today; anything but `YYYY-MM-DD` → `None`
fn parse_day(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return Some(shared::util::today());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

async fn resolve_staff(
    store: &SqliteStaffStore,
    code: &str,
    name: &str,
) -> Result<Option<Staff>, crate::db::repository::RepoError> {
    if !code.is_empty()
        && let Some(staff) = store.find_by_code(code).await?
    {
        return Ok(Some(staff));
    }
    if !name.is_empty() {
        return store.find_by_name(name).await;
    }
    Ok(None)
}

pub async fn import_passes(
    store: &SqliteStaffStore,
    qr: &QrGenerator,
    table: &Table,
) -> Result<ImportSummary, ImportError> {
    let index = HeaderIndex::new(&table.headers);
    let cols = PassColumns {
        full_name: index.position(FULL_NAME),
        phone: index.position(PHONE),
        booth: index.position(BOOTH),
        staff_code: index.position(STAFF_CODE),
        staff_name: index.position(STAFF_NAME),
        day: index.position(DAY),
    };
    if cols.staff_code.is_none() && cols.staff_name.is_none() {
        return Err(ImportError::MissingColumn("staff_code"));
    }

    let pool = store.pool();
    let mut summary = ImportSummary::default();

    for (i, row) in table.rows.iter().enumerate() {
        let line = i + 2;
        let Some(day) = parse_day(cell(row, cols.day)) else {
            tracing::warn!(line, day = %cell(row, cols.day), "Malformed day_entered, row skipped");
            summary.skipped += 1;
            continue;
        };

        let staff = match resolve_staff(store, cell(row, cols.staff_code), cell(row, cols.staff_name)).await {
            Ok(Some(staff)) => staff,
            Ok(None) => {
                tracing::warn!(line, "Pass row matches no staff, skipped");
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                tracing::error!(line, error = %e, "Staff lookup failed");
                summary.errored += 1;
                continue;
            }
        };

        match pass::find_by_staff(pool, staff.id).await {
            Ok(existing) if existing.iter().any(|p| p.day_entered == day) => {
                summary.skipped += 1;
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(line, error = %e, "Pass lookup failed");
                summary.errored += 1;
                continue;
            }
        }

        let or_staff = |raw: &str, fallback: &str| {
            if raw.is_empty() { fallback.to_string() } else { raw.to_string() }
        };
        let data = PassCreate {
            full_name: or_staff(cell(row, cols.full_name), &staff.name),
            phone_number: or_staff(cell(row, cols.phone), &staff.phone_number),
            booth_id: or_staff(cell(row, cols.booth), staff.booth_id.as_deref().unwrap_or("")),
            staff_id: staff.id,
            day_entered: day,
        };

        let mut created = match pass::create(pool, data).await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(line, error = %e, "Pass create failed");
                summary.errored += 1;
                continue;
            }
        };
        if let Err(e) = attach_qr(pool, qr, &mut created).await {
            tracing::warn!(pass_id = created.id, error = %e, "Pass QR generation failed");
        }
        summary.created += 1;
    }

    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        errored = summary.errored,
        "Pass import finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{Location, StaffCreate, StaffType};

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    async fn seeded() -> (DbService, SqliteStaffStore) {
        let db = DbService::open_in_memory().await.unwrap();
        let store = SqliteStaffStore::new(db.pool.clone());
        for (code, name) in [("1PV01", "Alice"), ("1PS02", "Bob")] {
            store
                .create(StaffCreate {
                    name: name.into(),
                    phone_number: "0123".into(),
                    booth_id: Some("A1".into()),
                    location: Location::Pavilion1,
                    staff_type: StaffType::Staff,
                    staff_code: code.into(),
                    sold: false,
                })
                .await
                .unwrap();
        }
        (db, store)
    }

    #[tokio::test]
    async fn test_import_passes() {
        let tmp = tempfile::tempdir().unwrap();
        let (db, store) = seeded().await;
        let qr = QrGenerator::new(tmp.path());
        let t = table(
            &["full_name", "phone_number", "booth_id", "staff_code", "staff_name", "day_entered"],
            &[
                &["Alice A", "", "", "1PV01", "", "2025-03-14"],
                &["", "", "", "", "Bob", "2025-03-14"],
                &["Ghost", "", "", "1PS99", "", "2025-03-14"],
                &["Alice A", "", "", "1PV01", "", "14/03/2025"],
            ],
        );

        let summary = import_passes(&store, &qr, &t).await.unwrap();
        assert_eq!(summary, ImportSummary { created: 2, updated: 0, skipped: 2, errored: 0 });

        let recent = pass::find_recent(&db.pool, 20).await.unwrap();
        assert_eq!(recent.len(), 2);
        let alice = recent.iter().find(|p| p.full_name == "Alice A").unwrap();
        assert_eq!(alice.booth_id, "A1");
        assert_eq!(alice.phone_number, "0123");
        assert!(alice.qr_code_path.is_some());

        // same staff, same day
        let again = import_passes(&store, &qr, &t).await.unwrap();
        assert_eq!(again.created, 0);
    }

    #[tokio::test]
    async fn test_import_requires_staff_reference() {
        let (_db, store) = seeded().await;
        let qr = QrGenerator::new(std::env::temp_dir());
        let t = table(&["full_name", "day_entered"], &[&["X", "2025-01-01"]]);
        assert!(matches!(
            import_passes(&store, &qr, &t).await,
            Err(ImportError::MissingColumn("staff_code"))
        ));
    }
}
