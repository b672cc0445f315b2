//! Staff Model

use super::{Location, StaffType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff entity (展位工作人员)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub booth_id: Option<String>,
    pub location: Location,
    pub staff_type: StaffType,
    pub staff_code: String,
    pub qr_code_path: Option<String>,
    pub printed: bool,
    pub sold: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Staff {
    /// Shared attributes of this record's booth group
    pub fn booth_fields(&self) -> BoothFields {
        BoothFields {
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
            booth_id: self.booth_id.clone(),
            location: self.location,
            staff_type: self.staff_type,
        }
    }
}

/// Create staff payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffCreate {
    pub name: String,
    pub phone_number: String,
    pub booth_id: Option<String>,
    pub location: Location,
    pub staff_type: StaffType,
    pub staff_code: String,
    #[serde(default)]
    pub sold: bool,
}

/// Update staff payload
///
/// `None` leaves a column untouched. `booth_id: Some(None)` clears the booth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub booth_id: Option<Option<String>>,
    pub location: Option<Location>,
    pub staff_type: Option<StaffType>,
    pub printed: Option<bool>,
    pub sold: Option<bool>,
}

impl StaffUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Fields every member of a booth group converges to on a roster edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoothFields {
    pub name: String,
    pub phone_number: String,
    pub booth_id: Option<String>,
    pub location: Location,
    pub staff_type: StaffType,
}

/// Booth group summary for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BoothSummary {
    pub booth_id: Option<String>,
    pub location: Location,
    pub name: String,
    pub staff_count: i64,
    pub printed_count: i64,
    pub sold_count: i64,
}

/// Human-readable staff code, e.g. `1PV01`
///
/// Layout: `{location prefix}{type letter}{sequence, zero padded to 2}`.
/// The code is the QR payload and the scan lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffCode(String);

impl StaffCode {
    pub fn new(prefix: &str, staff_type: StaffType, sequence: u32) -> Self {
        Self(format!("{}{}{:02}", prefix, staff_type.letter(), sequence))
    }

    /// Parse a scanned or imported code. Returns `None` when the text is not
    /// shaped like `<PREFIX><V|S><NN..>`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if !raw.is_ascii() {
            return None;
        }
        let digits = raw.len() - raw.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        if digits < 2 || digits == raw.len() {
            return None;
        }
        let head = &raw[..raw.len() - digits];
        let letter = head.chars().last()?;
        StaffType::from_letter(letter)?;
        let prefix = &head[..head.len() - 1];
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
            return None;
        }
        raw[raw.len() - digits..].parse::<u32>().ok()?;
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn split(&self) -> (&str, char, &str) {
        let digits = self.0.len() - self.0.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let head = &self.0[..self.0.len() - digits];
        let letter = head.chars().last().unwrap_or('S');
        (&head[..head.len() - 1], letter, &self.0[self.0.len() - digits..])
    }

    pub fn prefix(&self) -> &str {
        self.split().0
    }

    pub fn staff_type(&self) -> StaffType {
        StaffType::from_letter(self.split().1).unwrap_or_default()
    }

    pub fn sequence(&self) -> u32 {
        self.split().2.parse().unwrap_or(0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StaffCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Code prefix for a raw location cell.
///
/// Known locations use their token whatever the spelling: `1p` and
/// `Pavilion 1` → `1P`, `outdoor` → `O`. Anything else keeps only its ASCII
/// letters and digits, upper-cased (`hall b` → `HALLB`); blank → `X`.
pub fn location_prefix(raw: &str) -> String {
    if let Some(loc) = Location::parse(raw) {
        return token_prefix(loc.token());
    }
    let prefix: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if prefix.is_empty() { "X".to_string() } else { prefix }
}

fn token_prefix(token: &str) -> String {
    let mut chars = token.chars();
    if let (Some(first), Some(second), None) = (chars.next(), chars.next(), chars.next())
        && second.eq_ignore_ascii_case(&'p')
    {
        return format!("{}P", first);
    }
    token.to_uppercase()
}
