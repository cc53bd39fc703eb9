use std::path::PathBuf;

/// Default chunk size for bulk writes
pub const DEFAULT_BATCH_CHUNK_SIZE: usize = 200;

/// 引擎配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 (日志位于 logs/) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | production 时为 true | JSON 控制台输出 |
/// | LOG_TO_FILE | false | 是否写入滚动日志文件 |
/// | BATCH_CHUNK_SIZE | 200 | 批量写入分块大小 |
/// | SNAPSHOT_DEBOUNCE_MS | 0 | 快照重算前的合并窗口 (毫秒) |
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// 运行环境: development | production
    pub environment: String,
    /// 默认日志级别
    pub log_level: String,
    /// JSON 日志格式
    pub log_json: bool,
    /// 写入文件日志
    pub log_to_file: bool,
    /// 批量写入分块大小 (仍受存储端上限约束)
    pub batch_chunk_size: usize,
    /// 快照合并窗口 (毫秒), 0 表示每个快照立即重算
    pub snapshot_debounce_ms: u64,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON").unwrap_or(is_production),
            log_to_file: env_parse("LOG_TO_FILE").unwrap_or(false),
            batch_chunk_size: env_parse("BATCH_CHUNK_SIZE")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(DEFAULT_BATCH_CHUNK_SIZE),
            snapshot_debounce_ms: env_parse("SNAPSHOT_DEBOUNCE_MS").unwrap_or(0),
            environment,
        }
    }

    /// 测试用配置，不读取环境变量
    pub fn for_tests() -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            environment: "test".into(),
            log_level: "debug".into(),
            log_json: false,
            log_to_file: false,
            batch_chunk_size: DEFAULT_BATCH_CHUNK_SIZE,
            snapshot_debounce_ms: 0,
        }
    }

    /// 覆盖分块大小
    pub fn with_batch_chunk_size(mut self, size: usize) -> Self {
        self.batch_chunk_size = size.max(1);
        self
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
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
    fn test_for_tests_defaults() {
        let config = Config::for_tests();
        assert_eq!(config.batch_chunk_size, DEFAULT_BATCH_CHUNK_SIZE);
        assert_eq!(config.snapshot_debounce_ms, 0);
        assert!(!config.is_production());
        assert!(config.log_dir().ends_with("logs"));
    }

    #[test]
    fn test_chunk_size_never_zero() {
        let config = Config::for_tests().with_batch_chunk_size(0);
        assert_eq!(config.batch_chunk_size, 1);
    }
}
