use std::path::PathBuf;
use std::time::Duration;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、二维码、照片) |
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志文件目录, 设置后按天滚动写文件 |
/// | PHOTO_RETENTION_HOURS | 12 | 入场照片保留时长 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/entrance HTTP_PORT=8080 cargo run -- serve
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: PathBuf,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// tracing filter directive
    pub log_level: String,
    /// 日志目录 (None = 只输出到终端)
    pub log_dir: Option<PathBuf>,
    /// 入场照片保留小时数
    pub photo_retention_hours: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()).into(),
            http_port: env_parse("HTTP_PORT", 8000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            photo_retention_hours: env_parse("PHOTO_RETENTION_HOURS", 12),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<PathBuf>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn database_path(&self) -> PathBuf {
        self.work_dir.join("database").join("entrance.db")
    }

    pub fn qr_dir(&self) -> PathBuf {
        self.work_dir.join("media").join("qr")
    }

    pub fn photo_dir(&self) -> PathBuf {
        self.work_dir.join("media").join("pass_photos")
    }

    /// Default output of `export-booth-qr`
    pub fn export_dir(&self) -> PathBuf {
        self.work_dir.join("booth_qr_export")
    }

    pub fn photo_retention(&self) -> Duration {
        Duration::from_secs(self.photo_retention_hours * 3600)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// 创建工作目录结构
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [
            self.work_dir.join("database"),
            self.qr_dir(),
            self.photo_dir(),
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        let config = Config::with_overrides("/srv/entrance", 9000);
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.database_path(), PathBuf::from("/srv/entrance/database/entrance.db"));
        assert_eq!(config.qr_dir(), PathBuf::from("/srv/entrance/media/qr"));
        assert_eq!(config.photo_dir(), PathBuf::from("/srv/entrance/media/pass_photos"));
        assert_eq!(config.export_dir(), PathBuf::from("/srv/entrance/booth_qr_export"));
    }

    #[test]
    fn test_ensure_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(tmp.path(), 0);
        config.ensure_dirs().unwrap();
        assert!(config.qr_dir().is_dir());
        assert!(config.photo_dir().is_dir());
        assert!(tmp.path().join("database").is_dir());
    }

    #[test]
    fn test_durations() {
        let mut config = Config::with_overrides("/tmp", 0);
        config.photo_retention_hours = 12;
        config.shutdown_timeout_ms = 2500;
        assert_eq!(config.photo_retention(), Duration::from_secs(43200));
        assert_eq!(config.shutdown_timeout(), Duration::from_millis(2500));
    }
}
