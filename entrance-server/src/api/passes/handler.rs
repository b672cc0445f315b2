//! Pass API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::pass;
use crate::passes::save_photo;
use shared::error::{AppError, AppResult};
use shared::models::Pass;
use shared::util::now_millis;

const RECENT_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: &'static str,
    pub pass: Pass,
}

async fn load(state: &ServerState, id: i64) -> AppResult<Pass> {
    pass::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::pass_not_found(id))
}

pub async fn list_recent(State(state): State<ServerState>) -> AppResult<Json<Vec<Pass>>> {
    Ok(Json(pass::find_recent(&state.db, RECENT_LIMIT).await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Pass>> {
    Ok(Json(load(&state, id).await?))
}

pub async fn verify(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<VerifyResponse>> {
    let pass = load(&state, id).await?;
    Ok(Json(VerifyResponse { status: "valid", pass }))
}

/// Upload the gate photo for a pass
pub async fn upload_photo(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<Pass>> {
    load(&state, id).await?;

    let mut data = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() == Some("file") {
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?,
            );
            break;
        }
    }
    let data = data.ok_or_else(|| {
        AppError::validation("No 'file' field found. Field name must be 'file'".to_string())
    })?;

    let path = save_photo(&state.photo_dir(), id, &data).await?;
    let updated = pass::set_photo(&state.db, id, &path.to_string_lossy(), now_millis()).await?;

    tracing::info!(pass_id = id, "Pass photo uploaded");
    Ok(Json(updated))
}
