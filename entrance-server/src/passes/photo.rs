//! Gate photos

use super::PassError;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Upload limit (5MB)
pub const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024;

const JPEG_QUALITY: u8 = 85;

/// Decode any supported image and re-encode it as JPEG
fn compress(data: &[u8]) -> Result<Vec<u8>, PassError> {
    let img = image::load_from_memory(data).map_err(|e| PassError::Photo(e.to_string()))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        img.to_rgb8()
            .write_with_encoder(encoder)
            .map_err(|e| PassError::Photo(format!("Failed to compress image: {e}")))?;
    }
    Ok(buffer)
}

/// Store the photo for `pass_id` as `{dir}/{pass_id}.jpg`, replacing any earlier one
pub async fn save_photo(dir: &Path, pass_id: i64, data: &[u8]) -> Result<PathBuf, PassError> {
    if data.is_empty() {
        return Err(PassError::Photo("Empty file provided".to_string()));
    }
    if data.len() > MAX_PHOTO_SIZE {
        return Err(PassError::Photo(format!(
            "File too large. Maximum size is {}MB",
            MAX_PHOTO_SIZE / 1024 / 1024
        )));
    }

    let jpeg = compress(data)?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{pass_id}.jpg"));
    tokio::fs::write(&path, &jpeg).await?;

    tracing::debug!(pass_id, size = jpeg.len(), "Pass photo stored");
    Ok(path)
}
