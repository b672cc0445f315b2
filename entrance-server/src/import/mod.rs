//! Spreadsheet import
//!
//! - [`table`] - `.csv` / `.xlsx` / `.xls` / `.ods` → rows of strings
//! - [`columns`] - 表头匹配 (大小写、空格、下划线不敏感)
//! - [`cleaned`] - booth sheet → cleaned staff rows (`cleaned.csv`)
//! - [`passes`] - pass sheet → pass records

pub mod cleaned;
pub mod columns;
pub mod passes;
pub mod table;

pub use cleaned::{CleanedBuild, CleanedRow, build_cleaned, read_cleaned, write_cleaned_csv};
pub use columns::{Column, ColumnMap, HeaderIndex};
pub use table::{Table, read_table};

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Workbook has no worksheet")]
    EmptyWorkbook,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Import io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        let code = match &err {
            ImportError::UnsupportedFile(_) => ErrorCode::UnsupportedFile,
            ImportError::MissingColumn(_) => ErrorCode::MissingColumn,
            ImportError::Io(_) => ErrorCode::IoError,
            _ => ErrorCode::ImportFailed,
        };
        AppError::with_message(code, err.to_string())
    }
}
