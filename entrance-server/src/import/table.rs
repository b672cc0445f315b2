//! Sheet reader

use super::ImportError;
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

/// Header row plus data rows, every cell as trimmed text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read the first sheet of a spreadsheet, dispatching on the extension
pub fn read_table(path: &Path) -> Result<Table, ImportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let table = match ext.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        _ => return Err(ImportError::UnsupportedFile(path.display().to_string())),
    };
    tracing::debug!(path = %path.display(), rows = table.rows.len(), "Sheet loaded");
    Ok(table)
}

fn read_csv(path: &Path) -> Result<Table, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let row: Vec<String> = record?.iter().map(str::to_string).collect();
        if row.iter().any(|cell| !cell.is_empty()) {
            rows.push(row);
        }
    }
    Ok(Table { headers, rows })
}

fn read_workbook(path: &Path) -> Result<Table, ImportError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|r| r.iter().map(cell_text).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|r| r.iter().map(cell_text).collect::<Vec<String>>())
        .filter(|r| r.iter().any(|cell| !cell.is_empty()))
        .collect();
    Ok(Table { headers, rows })
}

/// Integral floats render without `.0` so counts and phone numbers survive
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_trims_and_skips_blank_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("booths.csv");
        std::fs::write(
            &path,
            "\u{feff}Name, Booth ID ,Staff no\nAcme , A1, 3\n,,\nBeta,B2\n",
        )
        .unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["Name", "Booth ID", "Staff no"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Acme", "A1", "3"]);
        assert_eq!(table.rows[1], vec!["Beta", "B2"]);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_table(Path::new("staff.pdf")).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFile(_)));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(60123456789.0)), "60123456789");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String(" 1p ".into())), "1p");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
