//! QR artifacts
//!
//! One PNG per key under the QR directory. The file name is derived from
//! the key, so an existing file is the cached artifact for that key.

pub mod export;

pub use export::{ExportSummary, export_booths};

use image::{ImageFormat, Luma};
use qrcode::QrCode;
use shared::error::{AppError, ErrorCode};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Minimum rendered edge in pixels
const QR_MIN_SIZE: u32 = 300;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("Invalid QR key: {0:?}")]
    InvalidKey(String),

    #[error("QR encode failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("QR image write failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("QR io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<QrError> for AppError {
    fn from(err: QrError) -> Self {
        match err {
            QrError::InvalidKey(_) => AppError::with_message(ErrorCode::StaffCodeInvalid, err.to_string()),
            _ => AppError::with_message(ErrorCode::QrGenerationFailed, err.to_string()),
        }
    }
}

/// 文件名只允许 `[A-Za-z0-9_-]`
///
/// Every staff code and pass key that gets a QR must pass this check.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[derive(Debug, Clone)]
pub struct QrGenerator {
    dir: PathBuf,
}

impl QrGenerator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, QrError> {
        if !is_valid_key(key) {
            return Err(QrError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.png")))
    }

    /// Render the QR for `key`, or return the existing artifact untouched
    pub fn generate(&self, key: &str) -> Result<PathBuf, QrError> {
        let path = self.path_for(key)?;
        if path.exists() {
            return Ok(path);
        }
        std::fs::create_dir_all(&self.dir)?;

        let code = QrCode::new(key.as_bytes())?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(QR_MIN_SIZE, QR_MIN_SIZE)
            .build();
        image.save_with_format(&path, ImageFormat::Png)?;

        tracing::debug!(key = %key, path = %path.display(), "QR code generated");
        Ok(path)
    }
}
