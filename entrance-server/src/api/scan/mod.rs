//! Scan API
//!
//! `GET /api/verify/{code}` - 扫码校验 (staff code 或 `pass-{id}`)

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::core::ServerState;
use crate::scan::{ScanResult, verify};
use shared::error::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/verify/{code}", get(scan))
}

async fn scan(State(state): State<ServerState>, Path(code): Path<String>) -> AppResult<Json<ScanResult>> {
    Ok(Json(verify(&state.staff, &state.db, &code).await?))
}
