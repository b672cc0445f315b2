//! Media Routes
//!
//! Serves generated QR codes and pass photos.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use http::header;

use crate::core::ServerState;
use shared::error::AppError;

enum MediaResponse {
    Ok(&'static str, Bytes),
    NotFound(String),
    BadRequest(&'static str),
}

impl IntoResponse for MediaResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            MediaResponse::Ok(content_type, content) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            MediaResponse::NotFound(name) => AppError::file_not_found(name).into_response(),
            MediaResponse::BadRequest(msg) => (http::StatusCode::BAD_REQUEST, msg).into_response(),
        }
    }
}

fn content_type(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

async fn serve(dir: std::path::PathBuf, filename: String) -> MediaResponse {
    // Security check: prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return MediaResponse::BadRequest("Invalid filename");
    }

    match tokio::fs::read(dir.join(&filename)).await {
        Ok(content) => MediaResponse::Ok(content_type(&filename), content.into()),
        Err(e) => {
            tracing::debug!(file = %filename, error = %e, "Media file not found");
            MediaResponse::NotFound(filename)
        }
    }
}

async fn serve_qr(State(state): State<ServerState>, Path(filename): Path<String>) -> MediaResponse {
    serve(state.qr.dir().to_path_buf(), filename).await
}

async fn serve_photo(State(state): State<ServerState>, Path(filename): Path<String>) -> MediaResponse {
    serve(state.photo_dir(), filename).await
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/media/qr/{filename}", get(serve_qr))
        .route("/api/media/photos/{filename}", get(serve_photo))
}
