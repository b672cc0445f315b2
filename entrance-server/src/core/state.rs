use sqlx::SqlitePool;
use std::path::PathBuf;

use crate::core::Config;
use crate::core::error::Result;
use crate::db::DbService;
use crate::db::repository::SqliteStaffStore;
use crate::qr::QrGenerator;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (pool 内部是 Arc)。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | SqlitePool | SQLite 连接池 |
/// | staff | SqliteStaffStore | staff 存储 |
/// | qr | QrGenerator | 二维码生成 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: SqlitePool,
    pub staff: SqliteStaffStore,
    pub qr: QrGenerator,
}

impl ServerState {
    /// Assemble state around an already opened pool
    pub fn new(config: Config, db: SqlitePool) -> Self {
        Self {
            staff: SqliteStaffStore::new(db.clone()),
            qr: QrGenerator::new(config.qr_dir()),
            config,
            db,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录结构
    /// 2. 打开数据库并执行迁移
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_dirs()?;
        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy()).await?;
        Ok(Self::new(config.clone(), db.pool))
    }

    pub fn photo_dir(&self) -> PathBuf {
        self.config.photo_dir()
    }
}
