//! Booth QR export
//!
//! Lays out every badge QR as `<root>/<location>/<booth>/<code>.png` with a
//! `staff_list.txt` per booth for the print shop.

use super::{QrError, QrGenerator};
use crate::db::repository::{RepoError, StaffFilter, StaffStore};
use shared::models::Staff;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

const NO_BOOTH_DIR: &str = "no_booth";
const STAFF_LIST_FILE: &str = "staff_list.txt";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Qr(#[from] QrError),

    #[error("Export io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub qr_codes: usize,
    pub booths: usize,
}

/// Directory-safe booth name
fn booth_dir(booth_id: Option<&str>) -> String {
    match booth_id.map(str::trim).filter(|b| !b.is_empty()) {
        Some(booth) => booth
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect(),
        None => NO_BOOTH_DIR.to_string(),
    }
}

fn staff_list(location_label: &str, booth_id: Option<&str>, members: &[Staff]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Location: {}", location_label);
    let _ = writeln!(out, "Booth ID: {}", booth_id.unwrap_or("N/A"));
    let _ = writeln!(out, "Total staff: {}", members.len());
    out.push('\n');
    for s in members {
        let _ = writeln!(out, "{},{},{},{}", s.staff_code, s.name, s.phone_number, s.staff_type);
    }
    out
}

/// Export every staff QR grouped by location and booth
pub async fn export_booths<S: StaffStore + ?Sized>(
    store: &S,
    qr: &QrGenerator,
    root: &Path,
) -> Result<ExportSummary, ExportError> {
    let staff = store.list(&StaffFilter::default()).await?;

    let mut booths: BTreeMap<PathBuf, Vec<Staff>> = BTreeMap::new();
    for member in staff {
        let dir = root
            .join(member.location.token())
            .join(booth_dir(member.booth_id.as_deref()));
        booths.entry(dir).or_default().push(member);
    }

    let mut summary = ExportSummary::default();
    for (dir, members) in &booths {
        tokio::fs::create_dir_all(dir).await?;
        for member in members {
            let source = qr.generate(&member.staff_code)?;
            if member.qr_code_path.is_none() {
                store.set_qr_path(member.id, &source.to_string_lossy()).await?;
            }
            tokio::fs::copy(&source, dir.join(format!("{}.png", member.staff_code))).await?;
            summary.qr_codes += 1;
        }

        let first = &members[0];
        let listing = staff_list(first.location.label(), first.booth_id.as_deref(), members);
        tokio::fs::write(dir.join(STAFF_LIST_FILE), listing).await?;
        summary.booths += 1;
    }

    tracing::info!(
        root = %root.display(),
        qr_codes = summary.qr_codes,
        booths = summary.booths,
        "Booth QR export finished"
    );
    Ok(summary)
}
