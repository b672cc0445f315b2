//! Pass API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/passes | GET | 最近入场记录 |
//! | /api/passes/{id} | GET | 详情 |
//! | /api/passes/{id}/verify | GET | 校验 |
//! | /api/passes/{id}/photo | POST | 上传照片 (multipart `file`) |

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::core::ServerState;
use crate::passes::MAX_PHOTO_SIZE;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/passes", get(handler::list_recent))
        .route("/api/passes/{id}", get(handler::get_by_id))
        .route("/api/passes/{id}/verify", get(handler::verify))
        .route(
            "/api/passes/{id}/photo",
            post(handler::upload_photo).layer(DefaultBodyLimit::max(MAX_PHOTO_SIZE + 64 * 1024)),
        )
}
