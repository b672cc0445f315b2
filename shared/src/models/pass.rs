//! Pass Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// QR payload prefix that distinguishes pass codes from staff codes
pub const PASS_KEY_PREFIX: &str = "pass-";

/// Pass entity (每日入场记录), owned by a staff record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Pass {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub booth_id: String,
    pub staff_id: i64,
    pub day_entered: NaiveDate,
    pub photo_path: Option<String>,
    pub photo_taken_at: Option<i64>,
    pub qr_code_path: Option<String>,
    pub created_at: i64,
}

impl Pass {
    /// QR payload for this pass
    pub fn qr_key(&self) -> String {
        pass_key(self.id)
    }
}

/// Create pass payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassCreate {
    pub full_name: String,
    pub phone_number: String,
    pub booth_id: String,
    pub staff_id: i64,
    pub day_entered: NaiveDate,
}

pub fn pass_key(id: i64) -> String {
    format!("{}{}", PASS_KEY_PREFIX, id)
}

/// Extract the pass id from a `pass-{id}` payload
pub fn parse_pass_key(raw: &str) -> Option<i64> {
    raw.trim()
        .strip_prefix(PASS_KEY_PREFIX)
        .and_then(|id| id.parse::<i64>().ok())
        .filter(|id| *id > 0)
}
