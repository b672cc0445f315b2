//! Staff-code allocator
//!
//! Expands booth rows (one row per booth with a headcount) into one badge
//! per head. The first badge of every booth is the VIP badge; codes run
//! `{prefix}{V|S}{seq:02}` with a per-location sequence that keeps counting
//! across booths within a batch.

use shared::models::{StaffCode, StaffType, location_prefix};
use std::collections::HashMap;
use thiserror::Error;

/// One booth as read from the sheet, raw cell text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoothRow {
    /// 1-based sheet line, for reporting
    pub line: usize,
    pub name: String,
    pub booth_id: String,
    pub location: String,
    pub headcount: Option<String>,
    pub phone_number: String,
    pub sold: Option<String>,
}

/// Per-location sequence counters, keyed by code prefix.
///
/// Threaded through a batch by value so separate batches never share state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceCounters(HashMap<String, u32>);

impl SequenceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last sequence handed out for a raw location token (0 when unused)
    pub fn current(&self, location: &str) -> u32 {
        self.0.get(&location_prefix(location)).copied().unwrap_or(0)
    }

    /// Start a location's counter after `last` (e.g. from codes already stored)
    pub fn seed(&mut self, location: &str, last: u32) {
        let slot = self.0.entry(location_prefix(location)).or_insert(0);
        *slot = (*slot).max(last);
    }

    fn next(&mut self, prefix: &str) -> u32 {
        let slot = self.0.entry(prefix.to_string()).or_insert(0);
        *slot += 1;
        *slot
    }
}

/// A single allocated badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedStaff {
    pub name: String,
    pub booth_id: String,
    pub phone_number: String,
    /// Raw location token; normalised when persisted
    pub location: String,
    pub staff_type: StaffType,
    pub staff_code: StaffCode,
    pub sold: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing name")]
    MissingName,

    #[error("missing booth id")]
    MissingBoothId,

    #[error("missing staff count")]
    MissingHeadcount,

    #[error("invalid staff count {0:?}")]
    InvalidHeadcount(String),
}

/// A row left out of the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSkip {
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    pub staff: Vec<AllocatedStaff>,
    pub skipped: Vec<RowSkip>,
    pub counters: SequenceCounters,
}

/// Headcount cell → positive count.
///
/// Spreadsheet floats with a zero fraction (`3.0`) are accepted.
pub fn parse_headcount(raw: &str) -> Result<u32, SkipReason> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SkipReason::MissingHeadcount);
    }
    let invalid = || SkipReason::InvalidHeadcount(raw.to_string());
    let count = match raw.parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            let f = raw.parse::<f64>().map_err(|_| invalid())?;
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(invalid());
            }
            f as i64
        }
    };
    match u32::try_from(count) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid()),
    }
}

fn check_row(row: &BoothRow) -> Result<u32, SkipReason> {
    if row.name.trim().is_empty() {
        return Err(SkipReason::MissingName);
    }
    if row.booth_id.trim().is_empty() {
        return Err(SkipReason::MissingBoothId);
    }
    parse_headcount(row.headcount.as_deref().unwrap_or(""))
}

/// Allocate badges for a batch of booth rows.
///
/// Invalid rows are reported in `skipped` and do not consume sequence numbers.
pub fn allocate(rows: &[BoothRow], mut counters: SequenceCounters) -> Allocation {
    let mut staff = Vec::new();
    let mut skipped = Vec::new();

    for row in rows {
        let headcount = match check_row(row) {
            Ok(n) => n,
            Err(reason) => {
                tracing::warn!(line = row.line, reason = %reason, "Booth row skipped");
                skipped.push(RowSkip { line: row.line, reason });
                continue;
            }
        };

        let location = row.location.trim();
        let prefix = location_prefix(location);
        for member in 0..headcount {
            let staff_type = if member == 0 { StaffType::Vip } else { StaffType::Staff };
            let sequence = counters.next(&prefix);
            staff.push(AllocatedStaff {
                name: row.name.trim().to_string(),
                booth_id: row.booth_id.trim().to_string(),
                phone_number: row.phone_number.trim().to_string(),
                location: location.to_string(),
                staff_type,
                staff_code: StaffCode::new(&prefix, staff_type, sequence),
                sold: row.sold.clone(),
            });
        }
    }

    Allocation { staff, skipped, counters }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn row(line: usize, booth: &str, location: &str, count: &str) -> BoothRow {
        BoothRow {
            line,
            name: format!("Company {booth}"),
            booth_id: booth.to_string(),
            location: location.to_string(),
            headcount: Some(count.to_string()),
            phone_number: "0123".to_string(),
            sold: None,
        }
    }

    fn codes(allocation: &Allocation) -> Vec<&str> {
        allocation.staff.iter().map(|s| s.staff_code.as_str()).collect()
    }

    #[test]
    fn test_single_booth_vip_first() {
        let a = allocate(&[row(2, "A1", "1p", "3")], SequenceCounters::new());
        assert_eq!(codes(&a), vec!["1PV01", "1PS02", "1PS03"]);
        assert_eq!(a.staff.iter().filter(|s| s.staff_type == StaffType::Vip).count(), 1);
        assert_eq!(a.staff[0].staff_type, StaffType::Vip);
        assert!(a.staff.iter().all(|s| s.booth_id == "A1" && s.location == "1p"));
    }

    #[test]
    fn test_sequence_continues_across_booths() {
        let rows = [row(2, "A1", "1p", "2"), row(3, "A2", "1p", "3")];
        let a = allocate(&rows, SequenceCounters::new());
        assert_eq!(codes(&a), vec!["1PV01", "1PS02", "1PV03", "1PS04", "1PS05"]);
        assert_eq!(a.counters.current("1p"), 5);
    }

    #[test]
    fn test_locations_have_independent_sequences() {
        let rows = [row(2, "A1", "1p", "2"), row(3, "B1", "O", "2"), row(4, "A2", "1P", "1")];
        let a = allocate(&rows, SequenceCounters::new());
        assert_eq!(codes(&a), vec!["1PV01", "1PS02", "OV01", "OS02", "1PV03"]);
    }

    #[test]
    fn test_codes_unique_within_batch() {
        let rows: Vec<BoothRow> = (0..20)
            .map(|i| row(i + 2, &format!("B{i}"), ["1p", "2p", "O", "hall", ""][i % 5], "4"))
            .collect();
        let a = allocate(&rows, SequenceCounters::new());
        assert_eq!(a.staff.len(), 80);
        let unique: HashSet<&str> = codes(&a).into_iter().collect();
        assert_eq!(unique.len(), 80);
        assert!(unique.contains("XV01"));
        assert!(unique.contains("HALLV01"));
    }

    #[test]
    fn test_counters_thread_between_batches() {
        let first = allocate(&[row(2, "A1", "2p", "2")], SequenceCounters::new());
        let second = allocate(&[row(2, "A9", "2p", "1")], first.counters);
        assert_eq!(codes(&second), vec!["2PV03"]);

        let fresh = allocate(&[row(2, "A9", "2p", "1")], SequenceCounters::new());
        assert_eq!(codes(&fresh), vec!["2PV01"]);
    }

    #[test]
    fn test_seeded_counter() {
        let mut counters = SequenceCounters::new();
        counters.seed("3p", 7);
        counters.seed("3P", 2);
        let a = allocate(&[row(2, "C1", "3p", "1")], counters);
        assert_eq!(codes(&a), vec!["3PV08"]);
    }

    #[test]
    fn test_invalid_rows_skipped_without_consuming_sequence() {
        let mut missing_name = row(3, "A2", "1p", "2");
        missing_name.name = "  ".into();
        let mut missing_count = row(5, "A4", "1p", "");
        missing_count.headcount = None;
        let rows = [
            row(2, "A1", "1p", "1"),
            missing_name,
            row(4, "", "1p", "2"),
            missing_count,
            row(6, "A5", "1p", "abc"),
            row(7, "A6", "1p", "0"),
            row(8, "A7", "1p", "-2"),
            row(9, "A8", "1p", "2"),
        ];
        let a = allocate(&rows, SequenceCounters::new());
        assert_eq!(codes(&a), vec!["1PV01", "1PV02", "1PS03"]);

        let reasons: Vec<(usize, SkipReason)> =
            a.skipped.into_iter().map(|s| (s.line, s.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (3, SkipReason::MissingName),
                (4, SkipReason::MissingBoothId),
                (5, SkipReason::MissingHeadcount),
                (6, SkipReason::InvalidHeadcount("abc".into())),
                (7, SkipReason::InvalidHeadcount("0".into())),
                (8, SkipReason::InvalidHeadcount("-2".into())),
            ]
        );
    }

    #[test]
    fn test_parse_headcount() {
        assert_eq!(parse_headcount("3"), Ok(3));
        assert_eq!(parse_headcount(" 3.0 "), Ok(3));
        assert!(parse_headcount("2.5").is_err());
        assert!(parse_headcount("NaN").is_err());
        assert_eq!(parse_headcount(""), Err(SkipReason::MissingHeadcount));
    }

    #[test]
    fn test_fields_carried_through() {
        let mut r = row(2, " A1 ", " O ", "1");
        r.sold = Some("yes".into());
        r.phone_number = " 60123 ".into();
        let a = allocate(&[r], SequenceCounters::new());
        let s = &a.staff[0];
        assert_eq!(s.booth_id, "A1");
        assert_eq!(s.location, "O");
        assert_eq!(s.phone_number, "60123");
        assert_eq!(s.sold.as_deref(), Some("yes"));
        assert_eq!(s.name, "Company  A1");
    }
}
