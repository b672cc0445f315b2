//! Unified error codes for the entrance service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Staff errors
//! - 2xxx: Pass errors
//! - 3xxx: Import errors
//! - 4xxx: Media (QR / photo) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the dashboard front-end
/// can switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Staff ====================
    /// Staff record not found
    StaffNotFound = 1001,
    /// Staff code already taken
    StaffCodeExists = 1002,
    /// Scanned payload is not a well-formed staff code
    StaffCodeInvalid = 1003,

    // ==================== 2xxx: Pass ====================
    /// Pass not found
    PassNotFound = 2001,
    /// Uploaded photo rejected
    PhotoInvalid = 2003,

    // ==================== 3xxx: Import ====================
    /// Import aborted
    ImportFailed = 3001,
    /// Required spreadsheet column missing
    MissingColumn = 3002,
    /// Unsupported spreadsheet format
    UnsupportedFile = 3003,

    // ==================== 4xxx: Media ====================
    /// QR image could not be generated
    QrGenerationFailed = 4001,
    /// Media file not found
    FileNotFound = 4002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// Filesystem error
    IoError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Staff
            ErrorCode::StaffNotFound => "Staff not found",
            ErrorCode::StaffCodeExists => "Staff code already exists",
            ErrorCode::StaffCodeInvalid => "Invalid QR code",

            // Pass
            ErrorCode::PassNotFound => "Pass not found",
            ErrorCode::PhotoInvalid => "Invalid photo",

            // Import
            ErrorCode::ImportFailed => "Import failed",
            ErrorCode::MissingColumn => "Required column is missing",
            ErrorCode::UnsupportedFile => "Unsupported file type",

            // Media
            ErrorCode::QrGenerationFailed => "QR code generation failed",
            ErrorCode::FileNotFound => "File not found",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::IoError => "Filesystem error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Staff
            1001 => Ok(ErrorCode::StaffNotFound),
            1002 => Ok(ErrorCode::StaffCodeExists),
            1003 => Ok(ErrorCode::StaffCodeInvalid),

            // Pass
            2001 => Ok(ErrorCode::PassNotFound),
            2003 => Ok(ErrorCode::PhotoInvalid),

            // Import
            3001 => Ok(ErrorCode::ImportFailed),
            3002 => Ok(ErrorCode::MissingColumn),
            3003 => Ok(ErrorCode::UnsupportedFile),

            // Media
            4001 => Ok(ErrorCode::QrGenerationFailed),
            4002 => Ok(ErrorCode::FileNotFound),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::IoError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
