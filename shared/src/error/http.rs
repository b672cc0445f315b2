//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::StaffNotFound
            | Self::PassNotFound
            | Self::FileNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::StaffCodeExists => StatusCode::CONFLICT,

            // 415 Unsupported Media Type
            Self::UnsupportedFile => StatusCode::UNSUPPORTED_MEDIA_TYPE,

            // 500 Internal Server Error
            Self::DatabaseError | Self::IoError | Self::QrGenerationFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation, malformed identifiers, import input)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::StaffNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::PassNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(
            ErrorCode::StaffCodeInvalid.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::MissingColumn.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::StaffCodeExists.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_system_errors() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::QrGenerationFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
