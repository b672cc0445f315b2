//! Pass Repository

use super::{RepoError, RepoResult};
use shared::models::{Pass, PassCreate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const PASS_COLUMNS: &str = "id, full_name, phone_number, booth_id, staff_id, day_entered, photo_path, photo_taken_at, qr_code_path, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Pass>> {
    let pass = sqlx::query_as::<_, Pass>(&format!("SELECT {PASS_COLUMNS} FROM pass WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(pass)
}

/// Most recent passes first
pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Pass>> {
    let passes = sqlx::query_as::<_, Pass>(&format!(
        "SELECT {PASS_COLUMNS} FROM pass ORDER BY created_at DESC, id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(passes)
}

pub async fn find_by_staff(pool: &SqlitePool, staff_id: i64) -> RepoResult<Vec<Pass>> {
    let passes = sqlx::query_as::<_, Pass>(&format!(
        "SELECT {PASS_COLUMNS} FROM pass WHERE staff_id = ? ORDER BY day_entered DESC, created_at DESC"
    ))
    .bind(staff_id)
    .fetch_all(pool)
    .await?;
    Ok(passes)
}

/// Passes whose photo was taken before `cutoff_millis`
pub async fn find_photos_before(pool: &SqlitePool, cutoff_millis: i64) -> RepoResult<Vec<Pass>> {
    let passes = sqlx::query_as::<_, Pass>(&format!(
        "SELECT {PASS_COLUMNS} FROM pass WHERE photo_path IS NOT NULL AND photo_taken_at < ? ORDER BY photo_taken_at"
    ))
    .bind(cutoff_millis)
    .fetch_all(pool)
    .await?;
    Ok(passes)
}

pub async fn create(pool: &SqlitePool, data: PassCreate) -> RepoResult<Pass> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO pass (id, full_name, phone_number, booth_id, staff_id, day_entered, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.full_name)
    .bind(&data.phone_number)
    .bind(&data.booth_id)
    .bind(data.staff_id)
    .bind(data.day_entered)
    .bind(now_millis())
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create pass".into()))
}

pub async fn set_qr_path(pool: &SqlitePool, id: i64, path: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE pass SET qr_code_path = ? WHERE id = ?")
        .bind(path)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Pass {id} not found")));
    }
    Ok(())
}

pub async fn set_photo(pool: &SqlitePool, id: i64, path: &str, taken_at: i64) -> RepoResult<Pass> {
    let rows = sqlx::query("UPDATE pass SET photo_path = ?, photo_taken_at = ? WHERE id = ?")
        .bind(path)
        .bind(taken_at)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Pass {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Pass {id} not found")))
}

pub async fn clear_photo(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    sqlx::query("UPDATE pass SET photo_path = NULL, photo_taken_at = NULL WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
