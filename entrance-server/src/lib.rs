//! Entrance Server - 展会入场证管理
//!
//! # 架构概述
//!
//! - **名单** (`roster`): staff code 分配、导入、展位人数调整
//! - **导入** (`import`): CSV / Excel 读取与列匹配
//! - **二维码** (`qr`): 生成与按展位导出
//! - **入场** (`passes`, `scan`): 签到、照片、扫码校验
//! - **数据库** (`db`): SQLite (sqlx)
//! - **HTTP API** (`api`): 管理后台接口
//!
//! # 模块结构
//!
//! ```text
//! entrance-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 连接池、迁移、存储
//! ├── roster/        # 分配器、upsert、resizer
//! ├── import/        # 表格读取
//! ├── qr/            # 二维码
//! ├── passes/        # 入场记录、照片
//! ├── scan.rs        # 扫码
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod import;
pub mod passes;
pub mod qr;
pub mod roster;
pub mod scan;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use db::repository::{MemoryStaffStore, SqliteStaffStore, StaffStore};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the config and start logging
pub fn setup_environment() -> Config {
    let _ = dotenv::dotenv();
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
  ___     _
 | __|_ _| |_ _ _ __ _ _ _  __ ___
 | _|| ' \  _| '_/ _` | ' \/ _/ -_)
 |___|_||_\__|_| \__,_|_||_\__\___|
    "#
    );
}
