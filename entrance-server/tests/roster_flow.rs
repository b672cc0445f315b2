//! Booth sheet → cleaned rows → SQLite → resize → export

use entrance_server::db::repository::{StaffFilter, StaffStore};
use entrance_server::import::{build_cleaned, read_cleaned, read_table, write_cleaned_csv};
use entrance_server::qr::{QrGenerator, export_booths};
use entrance_server::roster::{ImportSummary, resize, upsert};
use entrance_server::{DbService, SqliteStaffStore};
use shared::models::{Location, StaffType};
use std::collections::HashSet;

const BOOTH_SHEET: &str = "\
Name,Booth ID,Staff no,Phone no,Location
Acme Foods,A1,2,0123,1p
Beta Drinks,A2,3,0456,1p
Outdoor Grill,Z1,1,0789,O
Broken Row,,4,,1p
";

async fn setup() -> (tempfile::TempDir, SqliteStaffStore, QrGenerator) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::open_in_memory().await.unwrap();
    let qr = QrGenerator::new(tmp.path().join("qr"));
    (tmp, SqliteStaffStore::new(db.pool), qr)
}

async fn import_sheet(tmp: &tempfile::TempDir, store: &SqliteStaffStore, qr: &QrGenerator) -> ImportSummary {
    let sheet = tmp.path().join("booths.csv");
    std::fs::write(&sheet, BOOTH_SHEET).unwrap();

    let built = build_cleaned(&read_table(&sheet).unwrap()).unwrap();
    let cleaned = tmp.path().join("cleaned.csv");
    write_cleaned_csv(&cleaned, &built.rows, built.include_sold).unwrap();

    let rows = read_cleaned(&read_table(&cleaned).unwrap()).unwrap();
    upsert(store, qr, &rows).await
}

#[tokio::test]
async fn test_sheet_import_allocates_codes() {
    let (tmp, store, qr) = setup().await;
    let summary = import_sheet(&tmp, &store, &qr).await;
    assert_eq!(summary, ImportSummary { created: 6, updated: 0, skipped: 0, errored: 0 });

    let pavilion: Vec<String> = store
        .list(&StaffFilter { location: Some(Location::Pavilion1), ..Default::default() })
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.staff_code)
        .collect();
    let expected: HashSet<&str> = ["1PV01", "1PS02", "1PV03", "1PS04", "1PS05"].into();
    assert_eq!(pavilion.iter().map(String::as_str).collect::<HashSet<_>>(), expected);

    let a2 = store.find_group(Some("A2"), Location::Pavilion1).await.unwrap();
    assert_eq!(a2.len(), 3);
    assert_eq!(a2.iter().filter(|s| s.staff_type == StaffType::Vip).count(), 1);

    let grill = store.find_by_code("OV01").await.unwrap().unwrap();
    assert_eq!(grill.location, Location::Outdoor);
    assert!(std::path::Path::new(grill.qr_code_path.as_deref().unwrap()).exists());
}

#[tokio::test]
async fn test_reimport_creates_nothing() {
    let (tmp, store, qr) = setup().await;
    import_sheet(&tmp, &store, &qr).await;
    let again = import_sheet(&tmp, &store, &qr).await;
    assert_eq!(again, ImportSummary { created: 0, updated: 0, skipped: 6, errored: 0 });
    assert_eq!(store.list(&StaffFilter::default()).await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_resize_grow_keeps_original_ids() {
    let (tmp, store, qr) = setup().await;
    import_sheet(&tmp, &store, &qr).await;

    let before: HashSet<i64> = store
        .find_group(Some("A2"), Location::Pavilion1)
        .await
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    let anchor = store.find_by_code("1PV03").await.unwrap().unwrap();

    let out = resize(&store, &qr, anchor.id, anchor.booth_fields(), "5").await.unwrap();
    assert_eq!(out.created.len(), 2);
    assert_eq!(out.group_size, 5);

    let after = store.find_group(Some("A2"), Location::Pavilion1).await.unwrap();
    let after_ids: HashSet<i64> = after.iter().map(|s| s.id).collect();
    assert!(before.is_subset(&after_ids));
    let new_codes: Vec<&str> = out.created.iter().map(|s| s.staff_code.as_str()).collect();
    assert_eq!(new_codes, vec!["1PV06", "1PV07"]);
}

#[tokio::test]
async fn test_resize_shrink_and_equal() {
    let (tmp, store, qr) = setup().await;
    import_sheet(&tmp, &store, &qr).await;
    let anchor = store.find_by_code("1PS04").await.unwrap().unwrap();

    let mut fields = anchor.booth_fields();
    fields.name = "Beta Drinks Sdn Bhd".into();
    let same = resize(&store, &qr, anchor.id, fields.clone(), "3").await.unwrap();
    assert!(same.created.is_empty() && same.deleted.is_empty());
    let group = store.find_group(Some("A2"), Location::Pavilion1).await.unwrap();
    assert!(group.iter().all(|s| s.name == "Beta Drinks Sdn Bhd"));

    let shrunk = resize(&store, &qr, anchor.id, fields, "1").await.unwrap();
    assert_eq!(shrunk.deleted.len(), 2);
    assert_eq!(shrunk.anchor.map(|a| a.id), Some(anchor.id));
    assert_eq!(store.find_group(Some("A2"), Location::Pavilion1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_export_after_import() {
    let (tmp, store, qr) = setup().await;
    import_sheet(&tmp, &store, &qr).await;

    let root = tmp.path().join("export");
    let summary = export_booths(&store, &qr, &root).await.unwrap();
    assert_eq!(summary.qr_codes, 6);
    assert_eq!(summary.booths, 3);

    let listing = std::fs::read_to_string(root.join("1p/A2/staff_list.txt")).unwrap();
    assert!(listing.contains("Total staff: 3"));
    assert!(root.join("O/Z1/OV01.png").exists());
}
