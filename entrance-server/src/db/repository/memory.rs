//! In-memory staff store
//!
//! Mirrors the SQLite store's semantics (unique codes, NULL-booth groups,
//! list ordering). Used by unit tests and `--dry-run` imports.

use super::{RepoError, RepoResult, StaffFilter, StaffStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{BoothFields, Location, Staff, StaffCreate, StaffUpdate};
use shared::util::{now_millis, snowflake_id};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct MemoryStaffStore {
    rows: Mutex<BTreeMap<i64, Staff>>,
}

impl MemoryStaffStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with existing records, kept as is
    pub fn with_staff(staff: impl IntoIterator<Item = Staff>) -> Self {
        Self {
            rows: Mutex::new(staff.into_iter().map(|s| (s.id, s)).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    /// Snapshot of every record, in insertion order
    pub fn all(&self) -> Vec<Staff> {
        let mut all: Vec<Staff> = self.rows.lock().values().cloned().collect();
        all.sort_by_key(|s| (s.created_at, s.id));
        all
    }
}

fn in_group(staff: &Staff, booth_id: Option<&str>, location: Location) -> bool {
    staff.booth_id.as_deref() == booth_id && staff.location == location
}

#[async_trait]
impl StaffStore for MemoryStaffStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Staff>> {
        Ok(self.rows.lock().get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Staff>> {
        Ok(self.rows.lock().values().find(|s| s.staff_code == code).cloned())
    }

    async fn find_group(&self, booth_id: Option<&str>, location: Location) -> RepoResult<Vec<Staff>> {
        let mut group: Vec<Staff> = self
            .rows
            .lock()
            .values()
            .filter(|s| in_group(s, booth_id, location))
            .cloned()
            .collect();
        group.sort_by_key(|s| (s.created_at, s.id));
        Ok(group)
    }

    async fn find_by_location(&self, location: Location) -> RepoResult<Vec<Staff>> {
        let mut staff: Vec<Staff> = self
            .rows
            .lock()
            .values()
            .filter(|s| s.location == location)
            .cloned()
            .collect();
        staff.sort_by(|a, b| a.staff_code.cmp(&b.staff_code));
        Ok(staff)
    }

    async fn list(&self, filter: &StaffFilter) -> RepoResult<Vec<Staff>> {
        let mut staff: Vec<Staff> = self
            .rows
            .lock()
            .values()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        staff.sort_by(|a, b| {
            (a.location, &a.booth_id, &a.name, &a.staff_code, a.id)
                .cmp(&(b.location, &b.booth_id, &b.name, &b.staff_code, b.id))
        });
        Ok(staff)
    }

    async fn create(&self, data: StaffCreate) -> RepoResult<Staff> {
        let mut rows = self.rows.lock();
        if rows.values().any(|s| s.staff_code == data.staff_code) {
            return Err(RepoError::Duplicate(format!(
                "Staff code '{}' already exists",
                data.staff_code
            )));
        }
        let mut id = snowflake_id();
        while rows.contains_key(&id) {
            id = snowflake_id();
        }
        // Strictly increasing so insertion order survives same-millisecond creates
        let now = rows
            .values()
            .map(|s| s.created_at + 1)
            .max()
            .map_or_else(now_millis, |next| next.max(now_millis()));
        let staff = Staff {
            id,
            name: data.name,
            phone_number: data.phone_number,
            booth_id: data.booth_id,
            location: data.location,
            staff_type: data.staff_type,
            staff_code: data.staff_code,
            qr_code_path: None,
            printed: false,
            sold: data.sold,
            created_at: now,
            updated_at: now,
        };
        rows.insert(id, staff.clone());
        Ok(staff)
    }

    async fn update(&self, id: i64, data: StaffUpdate) -> RepoResult<Staff> {
        let mut rows = self.rows.lock();
        let staff = rows
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("Staff {id} not found")))?;
        if let Some(name) = data.name {
            staff.name = name;
        }
        if let Some(phone_number) = data.phone_number {
            staff.phone_number = phone_number;
        }
        if let Some(booth_id) = data.booth_id {
            staff.booth_id = booth_id;
        }
        if let Some(location) = data.location {
            staff.location = location;
        }
        if let Some(staff_type) = data.staff_type {
            staff.staff_type = staff_type;
        }
        if let Some(printed) = data.printed {
            staff.printed = printed;
        }
        if let Some(sold) = data.sold {
            staff.sold = sold;
        }
        staff.updated_at = now_millis();
        Ok(staff.clone())
    }

    async fn update_group(
        &self,
        booth_id: Option<&str>,
        location: Location,
        fields: &BoothFields,
    ) -> RepoResult<u64> {
        let now = now_millis();
        let mut affected = 0;
        for staff in self.rows.lock().values_mut() {
            if in_group(staff, booth_id, location) {
                staff.name = fields.name.clone();
                staff.phone_number = fields.phone_number.clone();
                staff.booth_id = fields.booth_id.clone();
                staff.location = fields.location;
                staff.staff_type = fields.staff_type;
                staff.updated_at = now;
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn set_qr_path(&self, id: i64, path: &str) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let staff = rows
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("Staff {id} not found")))?;
        staff.qr_code_path = Some(path.to_string());
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.rows.lock().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::StaffType;

    fn new_staff(code: &str, booth: Option<&str>) -> StaffCreate {
        StaffCreate {
            name: "Stall".into(),
            phone_number: "N/A".into(),
            booth_id: booth.map(str::to_string),
            location: Location::Pavilion4,
            staff_type: StaffType::Staff,
            staff_code: code.into(),
            sold: false,
        }
    }

    #[tokio::test]
    async fn test_group_order_is_insertion_order() {
        let store = MemoryStaffStore::new();
        let a = store.create(new_staff("4PS01", Some("D1"))).await.unwrap();
        let b = store.create(new_staff("4PS02", Some("D1"))).await.unwrap();
        let c = store.create(new_staff("4PS03", Some("D1"))).await.unwrap();

        let ids: Vec<i64> = store
            .find_group(Some("D1"), Location::Pavilion4)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_with_staff_keeps_records() {
        let seed = MemoryStaffStore::new();
        let a = seed.create(new_staff("4PS01", Some("D1"))).await.unwrap();

        let store = MemoryStaffStore::with_staff(seed.all());
        assert_eq!(store.find_by_code("4PS01").await.unwrap(), Some(a));
        let b = store.create(new_staff("4PS02", Some("D1"))).await.unwrap();
        assert!(b.created_at > store.find_by_code("4PS01").await.unwrap().unwrap().created_at);
    }

    #[tokio::test]
    async fn test_duplicate_code() {
        let store = MemoryStaffStore::new();
        store.create(new_staff("4PS01", None)).await.unwrap();
        assert!(matches!(
            store.create(new_staff("4PS01", None)).await,
            Err(RepoError::Duplicate(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStaffStore::new();
        let err = store.update(42, StaffUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        assert!(store.set_qr_path(42, "x.png").await.is_err());
    }
}
