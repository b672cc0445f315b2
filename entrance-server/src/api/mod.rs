//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`staff`] - staff 管理、展位编辑、签到
//! - [`passes`] - 入场记录与照片
//! - [`scan`] - 扫码校验
//! - [`media`] - 二维码 / 照片文件

pub mod health;
pub mod media;
pub mod passes;
pub mod scan;
pub mod staff;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::ServerState;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(staff::router())
        .merge(passes::router())
        .merge(scan::router())
        .merge(media::router())
}

/// Router with state and the tower-http layers applied
pub fn build_router(state: ServerState) -> Router {
    build_app()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
