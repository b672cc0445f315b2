//! Location and staff type enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical area of the venue (场馆区域)
///
/// Stored and serialized as its short token (`1p`..`4p`, `O`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum Location {
    #[default]
    #[serde(rename = "1p")]
    #[cfg_attr(feature = "db", sqlx(rename = "1p"))]
    Pavilion1,
    #[serde(rename = "2p")]
    #[cfg_attr(feature = "db", sqlx(rename = "2p"))]
    Pavilion2,
    #[serde(rename = "3p")]
    #[cfg_attr(feature = "db", sqlx(rename = "3p"))]
    Pavilion3,
    #[serde(rename = "4p")]
    #[cfg_attr(feature = "db", sqlx(rename = "4p"))]
    Pavilion4,
    #[serde(rename = "O")]
    #[cfg_attr(feature = "db", sqlx(rename = "O"))]
    Outdoor,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::Pavilion1,
        Location::Pavilion2,
        Location::Pavilion3,
        Location::Pavilion4,
        Location::Outdoor,
    ];

    /// Short token used in storage and spreadsheets
    pub const fn token(&self) -> &'static str {
        match self {
            Location::Pavilion1 => "1p",
            Location::Pavilion2 => "2p",
            Location::Pavilion3 => "3p",
            Location::Pavilion4 => "4p",
            Location::Outdoor => "O",
        }
    }

    /// Display label for badges and the dashboard
    pub const fn label(&self) -> &'static str {
        match self {
            Location::Pavilion1 => "Pavilion 1",
            Location::Pavilion2 => "Pavilion 2",
            Location::Pavilion3 => "Pavilion 3",
            Location::Pavilion4 => "Pavilion 4",
            Location::Outdoor => "Outdoor",
        }
    }

    /// Parse a token (`1p`, `1P`, `o`) or a label (`Pavilion 1`, `outdoor`).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|loc| {
            loc.token().eq_ignore_ascii_case(raw) || loc.label().eq_ignore_ascii_case(raw)
        })
    }

    /// Parse, falling back to Pavilion 1 for anything unrecognised.
    pub fn normalize(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown location '{}'", s))
    }
}

/// Badge type. One VIP per booth under allocator-generated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum StaffType {
    #[serde(rename = "VIP")]
    #[cfg_attr(feature = "db", sqlx(rename = "VIP"))]
    Vip,
    #[default]
    Staff,
}

impl StaffType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StaffType::Vip => "VIP",
            StaffType::Staff => "Staff",
        }
    }

    /// Letter embedded in the staff code
    pub const fn letter(&self) -> char {
        match self {
            StaffType::Vip => 'V',
            StaffType::Staff => 'S',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'V' => Some(StaffType::Vip),
            'S' => Some(StaffType::Staff),
            _ => None,
        }
    }

    /// `VIP` in any case is a VIP; `Sales`, `Staff`, blank and anything else are staff.
    pub fn normalize(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("vip") {
            StaffType::Vip
        } else {
            StaffType::Staff
        }
    }
}

impl fmt::Display for StaffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
