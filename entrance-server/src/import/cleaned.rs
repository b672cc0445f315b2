//! Cleaned staff rows
//!
//! `cleaned.csv` is the hand-off between allocation and the database:
//! one row per badge with its staff code.

use super::columns::{Column, ColumnMap};
use super::{ImportError, Table};
use crate::roster::{AllocatedStaff, BoothRow, RowSkip, SequenceCounters, allocate};
use serde::Serialize;
use std::path::Path;

/// One badge row, raw text as written to / read from `cleaned.csv`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanedRow {
    pub name: String,
    pub booth_id: String,
    pub staff_code: String,
    pub phone_number: String,
    pub location: String,
    pub staff_type: String,
    /// `None` when the sheet has no Sold column
    pub sold: Option<String>,
}

impl From<AllocatedStaff> for CleanedRow {
    fn from(staff: AllocatedStaff) -> Self {
        Self {
            name: staff.name,
            booth_id: staff.booth_id,
            staff_code: staff.staff_code.into_string(),
            phone_number: staff.phone_number,
            location: staff.location,
            staff_type: staff.staff_type.as_str().to_string(),
            sold: staff.sold,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CleanedBuild {
    pub rows: Vec<CleanedRow>,
    pub skipped: Vec<RowSkip>,
    /// Sheet already carried staff codes, allocator bypassed
    pub passthrough: bool,
    pub include_sold: bool,
}

const BOOTH_COLUMNS: [Column; 5] = [
    Column::Name,
    Column::BoothId,
    Column::StaffCount,
    Column::PhoneNo,
    Column::Location,
];

fn cleaned_rows(map: &ColumnMap, table: &Table) -> Vec<CleanedRow> {
    table
        .rows
        .iter()
        .map(|row| CleanedRow {
            name: map.cell(row, Column::Name).to_string(),
            booth_id: map.cell(row, Column::BoothId).to_string(),
            staff_code: map.cell(row, Column::StaffCode).to_string(),
            phone_number: map.cell(row, Column::PhoneNo).to_string(),
            location: map.cell(row, Column::Location).to_string(),
            staff_type: map.cell(row, Column::StaffType).to_string(),
            sold: map.optional_cell(row, Column::Sold),
        })
        .collect()
}

/// Booth sheet → cleaned rows.
///
/// A sheet that already has a `Staff Code` column passes through as is.
/// Otherwise every booth column is required and rows go through the allocator.
pub fn build_cleaned(table: &Table) -> Result<CleanedBuild, ImportError> {
    let map = ColumnMap::resolve(&table.headers);
    let include_sold = map.has(Column::Sold);

    if map.has(Column::StaffCode) {
        tracing::info!("Sheet already has staff codes, skipping allocation");
        return Ok(CleanedBuild {
            rows: cleaned_rows(&map, table),
            skipped: Vec::new(),
            passthrough: true,
            include_sold,
        });
    }

    map.require(&BOOTH_COLUMNS)?;
    let booths: Vec<BoothRow> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| BoothRow {
            // header is line 1
            line: i + 2,
            name: map.cell(row, Column::Name).to_string(),
            booth_id: map.cell(row, Column::BoothId).to_string(),
            location: map.cell(row, Column::Location).to_string(),
            headcount: map.optional_cell(row, Column::StaffCount),
            phone_number: map.cell(row, Column::PhoneNo).to_string(),
            sold: map.optional_cell(row, Column::Sold),
        })
        .collect();

    let allocation = allocate(&booths, SequenceCounters::new());
    tracing::info!(
        booths = booths.len(),
        staff = allocation.staff.len(),
        skipped = allocation.skipped.len(),
        "Staff codes allocated"
    );
    Ok(CleanedBuild {
        rows: allocation.staff.into_iter().map(CleanedRow::from).collect(),
        skipped: allocation.skipped,
        passthrough: false,
        include_sold,
    })
}

/// Rows of an existing `cleaned.csv`; requires the `Staff Code` column
pub fn read_cleaned(table: &Table) -> Result<Vec<CleanedRow>, ImportError> {
    let map = ColumnMap::resolve(&table.headers);
    map.require(&[Column::StaffCode])?;
    Ok(cleaned_rows(&map, table))
}

pub fn write_cleaned_csv(path: &Path, rows: &[CleanedRow], include_sold: bool) -> Result<(), ImportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![
        Column::Name.label(),
        Column::BoothId.label(),
        Column::StaffCode.label(),
        Column::PhoneNo.label(),
        Column::Location.label(),
        Column::StaffType.label(),
    ];
    if include_sold {
        header.push(Column::Sold.label());
    }
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.name.as_str(),
            row.booth_id.as_str(),
            row.staff_code.as_str(),
            row.phone_number.as_str(),
            row.location.as_str(),
            row.staff_type.as_str(),
        ];
        if include_sold {
            record.push(row.sold.as_deref().unwrap_or(""));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = rows.len(), "cleaned.csv written");
    Ok(())
}
