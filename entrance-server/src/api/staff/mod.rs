//! Staff API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/staff | GET / POST | 列表 (过滤) / 新增单个 |
//! | /api/staff/{id} | GET / PUT / DELETE | 查询 / 编辑展位并调整人数 / 删除 |
//! | /api/staff/{id}/printed | POST | 切换已打印 |
//! | /api/staff/{id}/sold | POST | 切换已售 |
//! | /api/staff/{id}/passes | GET / POST | 入场记录 / 签到 |
//! | /api/booths | GET | 展位汇总 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/staff", get(handler::list).post(handler::create))
        .route(
            "/api/staff/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/api/staff/{id}/printed", post(handler::toggle_printed))
        .route("/api/staff/{id}/sold", post(handler::toggle_sold))
        .route(
            "/api/staff/{id}/passes",
            get(handler::list_passes).post(handler::check_in),
        )
        .route("/api/booths", get(handler::booths))
}
