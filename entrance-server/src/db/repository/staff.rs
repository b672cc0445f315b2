//! Staff Repository (SQLite)

use super::{RepoError, RepoResult, StaffFilter, StaffStore};
use async_trait::async_trait;
use shared::models::{BoothFields, BoothSummary, Location, Staff, StaffCreate, StaffUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const STAFF_COLUMNS: &str = "id, name, phone_number, booth_id, location, staff_type, staff_code, qr_code_path, printed, sold, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteStaffStore {
    pool: SqlitePool,
}

impl SqliteStaffStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Exact name match, used by pass import when no code is given
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff WHERE name = ? ORDER BY created_at, id LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(staff)
    }

    /// Booth groups with member / printed / sold counts
    pub async fn booth_summaries(&self) -> RepoResult<Vec<BoothSummary>> {
        let booths = sqlx::query_as::<_, BoothSummary>(
            "SELECT booth_id, location, MIN(name) AS name, COUNT(*) AS staff_count, \
             SUM(printed) AS printed_count, SUM(sold) AS sold_count \
             FROM staff GROUP BY booth_id, location ORDER BY location, booth_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(booths)
    }
}

#[async_trait]
impl StaffStore for SqliteStaffStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(&format!("SELECT {STAFF_COLUMNS} FROM staff WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(staff)
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff WHERE staff_code = ? LIMIT 1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(staff)
    }

    async fn find_group(&self, booth_id: Option<&str>, location: Location) -> RepoResult<Vec<Staff>> {
        // `IS` so that a NULL booth matches the other NULL-booth records
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff WHERE booth_id IS ? AND location = ? ORDER BY created_at, id"
        ))
        .bind(booth_id)
        .bind(location)
        .fetch_all(&self.pool)
        .await?;
        Ok(staff)
    }

    async fn find_by_location(&self, location: Location) -> RepoResult<Vec<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff WHERE location = ? ORDER BY staff_code"
        ))
        .bind(location)
        .fetch_all(&self.pool)
        .await?;
        Ok(staff)
    }

    async fn list(&self, filter: &StaffFilter) -> RepoResult<Vec<Staff>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {STAFF_COLUMNS} FROM staff WHERE 1 = 1"));
        if let Some(booth_id) = &filter.booth_id {
            qb.push(" AND booth_id = ").push_bind(booth_id.clone());
        }
        if let Some(location) = filter.location {
            qb.push(" AND location = ").push_bind(location);
        }
        if let Some(printed) = filter.printed {
            qb.push(" AND printed = ").push_bind(printed);
        }
        if let Some(sold) = filter.sold {
            qb.push(" AND sold = ").push_bind(sold);
        }
        if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{q}%");
            qb.push(" AND (name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR staff_code LIKE ")
                .push_bind(pattern.clone())
                .push(" OR booth_id LIKE ")
                .push_bind(pattern.clone())
                .push(" OR phone_number LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY location, booth_id, name, staff_code, id");

        let staff = qb.build_query_as::<Staff>().fetch_all(&self.pool).await?;
        Ok(staff)
    }

    async fn create(&self, data: StaffCreate) -> RepoResult<Staff> {
        let id = snowflake_id();
        let now = now_millis();
        sqlx::query(
            "INSERT INTO staff (id, name, phone_number, booth_id, location, staff_type, staff_code, printed, sold, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9, ?9)",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.phone_number)
        .bind(&data.booth_id)
        .bind(data.location)
        .bind(data.staff_type)
        .bind(&data.staff_code)
        .bind(data.sold)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create staff".into()))
    }

    async fn update(&self, id: i64, data: StaffUpdate) -> RepoResult<Staff> {
        let (has_booth, booth_id) = match data.booth_id {
            Some(booth_id) => (true, booth_id),
            None => (false, None),
        };
        let rows = sqlx::query(
            "UPDATE staff SET \
                name = COALESCE(?1, name), \
                phone_number = COALESCE(?2, phone_number), \
                booth_id = CASE WHEN ?3 THEN ?4 ELSE booth_id END, \
                location = COALESCE(?5, location), \
                staff_type = COALESCE(?6, staff_type), \
                printed = COALESCE(?7, printed), \
                sold = COALESCE(?8, sold), \
                updated_at = ?9 \
             WHERE id = ?10",
        )
        .bind(data.name)
        .bind(data.phone_number)
        .bind(has_booth)
        .bind(booth_id)
        .bind(data.location)
        .bind(data.staff_type)
        .bind(data.printed)
        .bind(data.sold)
        .bind(now_millis())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if rows.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Staff {id} not found")));
        }
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Staff {id} not found")))
    }

    async fn update_group(
        &self,
        booth_id: Option<&str>,
        location: Location,
        fields: &BoothFields,
    ) -> RepoResult<u64> {
        let rows = sqlx::query(
            "UPDATE staff SET name = ?1, phone_number = ?2, booth_id = ?3, location = ?4, staff_type = ?5, updated_at = ?6 \
             WHERE booth_id IS ?7 AND location = ?8",
        )
        .bind(&fields.name)
        .bind(&fields.phone_number)
        .bind(&fields.booth_id)
        .bind(fields.location)
        .bind(fields.staff_type)
        .bind(now_millis())
        .bind(booth_id)
        .bind(location)
        .execute(&self.pool)
        .await?;
        Ok(rows.rows_affected())
    }

    async fn set_qr_path(&self, id: i64, path: &str) -> RepoResult<()> {
        let rows = sqlx::query("UPDATE staff SET qr_code_path = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if rows.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Staff {id} not found")));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM staff WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected() > 0)
    }
}
