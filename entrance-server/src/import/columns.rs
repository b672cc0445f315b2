//! Header matching

/// Header → column index, matched after lower-casing and collapsing
/// whitespace and underscores (`Booth ID`, `booth_id`, ` BOOTH  id`).
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    headers: Vec<String>,
}

pub fn normalize_header(raw: &str) -> String {
    raw.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl HeaderIndex {
    pub fn new(headers: &[String]) -> Self {
        Self {
            headers: headers.iter().map(|h| normalize_header(h)).collect(),
        }
    }

    /// First header matching any alias
    pub fn position(&self, aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.headers.iter().position(|h| h == alias))
    }
}

/// Columns of the booth / cleaned staff sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    BoothId,
    StaffCount,
    PhoneNo,
    Location,
    Sold,
    StaffCode,
    StaffType,
}

impl Column {
    /// Header written to `cleaned.csv` and reported when missing
    pub const fn label(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::BoothId => "Booth ID",
            Column::StaffCount => "Staff no",
            Column::PhoneNo => "Phone no",
            Column::Location => "Location",
            Column::Sold => "Sold",
            Column::StaffCode => "Staff Code",
            Column::StaffType => "Staff Type",
        }
    }

    const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::Name => &["name"],
            Column::BoothId => &["booth id", "boothid", "booth"],
            Column::StaffCount => &["staff no", "staff count", "staff number"],
            Column::PhoneNo => &["phone no", "phone number", "phone"],
            Column::Location => &["location"],
            Column::Sold => &["sold"],
            Column::StaffCode => &["staff code"],
            Column::StaffType => &["staff type"],
        }
    }
}

/// Resolved staff-sheet columns
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: Vec<(Column, usize)>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String]) -> Self {
        let index = HeaderIndex::new(headers);
        let positions = [
            Column::Name,
            Column::BoothId,
            Column::StaffCount,
            Column::PhoneNo,
            Column::Location,
            Column::Sold,
            Column::StaffCode,
            Column::StaffType,
        ]
        .into_iter()
        .filter_map(|col| index.position(col.aliases()).map(|pos| (col, pos)))
        .collect();
        Self { positions }
    }

    pub fn get(&self, column: Column) -> Option<usize> {
        self.positions
            .iter()
            .find(|(col, _)| *col == column)
            .map(|(_, pos)| *pos)
    }

    pub fn has(&self, column: Column) -> bool {
        self.get(column).is_some()
    }

    /// First missing column, in the order given
    pub fn require(&self, columns: &[Column]) -> Result<(), super::ImportError> {
        match columns.iter().find(|col| !self.has(**col)) {
            Some(col) => Err(super::ImportError::MissingColumn(col.label())),
            None => Ok(()),
        }
    }

    /// Cell text, empty when the column or the cell is absent
    pub fn cell<'a>(&self, row: &'a [String], column: Column) -> &'a str {
        self.get(column)
            .and_then(|pos| row.get(pos))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// `None` when the column is absent, the (possibly empty) text otherwise
    pub fn optional_cell(&self, row: &[String], column: Column) -> Option<String> {
        self.get(column)
            .map(|pos| row.get(pos).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ImportError;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Booth   ID "), "booth id");
        assert_eq!(normalize_header("booth_id"), "booth id");
        assert_eq!(normalize_header("STAFF COUNT"), "staff count");
    }

    #[test]
    fn test_resolve_is_case_and_separator_insensitive() {
        let map = ColumnMap::resolve(&headers(&["NAME", "booth_id", "staff COUNT", "Phone No", "location"]));
        assert_eq!(map.get(Column::Name), Some(0));
        assert_eq!(map.get(Column::BoothId), Some(1));
        assert_eq!(map.get(Column::StaffCount), Some(2));
        assert_eq!(map.get(Column::PhoneNo), Some(3));
        assert_eq!(map.get(Column::Location), Some(4));
        assert!(!map.has(Column::StaffCode));
        assert!(map.require(&[Column::Name, Column::StaffCount]).is_ok());
    }

    #[test]
    fn test_require_reports_first_missing() {
        let map = ColumnMap::resolve(&headers(&["Name", "Location"]));
        let err = map
            .require(&[Column::Name, Column::BoothId, Column::StaffCount])
            .unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn("Booth ID")));
    }

    #[test]
    fn test_cells() {
        let map = ColumnMap::resolve(&headers(&["Name", "Sold"]));
        let row = vec!["Acme".to_string()];
        assert_eq!(map.cell(&row, Column::Name), "Acme");
        assert_eq!(map.cell(&row, Column::Location), "");
        assert_eq!(map.optional_cell(&row, Column::Sold), Some(String::new()));
        assert_eq!(map.optional_cell(&row, Column::StaffType), None);
    }
}
