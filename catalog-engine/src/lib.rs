//! Catalog Engine - 双门店商品分类协调与同步引擎
//!
//! # 架构概述
//!
//! 两个独立库存的门店共享一套分类体系 (分类 → 品牌 → 商品)。本 crate 负责：
//!
//! - **分类去重** (`taxonomy::normalize`): 按归一化名称合并近似分类
//! - **品牌合并** (`taxonomy::reconcile`): 种子品牌 + 门店动态品牌
//! - **归属判定** (`taxonomy::classifier`): 有序规则表
//! - **显示排序** (`ordering`): 持久化排序列表与拖拽移动
//! - **双店镜像** (`sync`): 新建记录镜像到兄弟门店、分块批量写入
//! - **会话** (`core::session`): 订阅快照、全量重算视图
//!
//! # 模块结构
//!
//! ```text
//! catalog-engine/src/
//! ├── core/          # 配置、门店会话
//! ├── db/            # CatalogStore 接口、内存实现
//! ├── taxonomy/      # 去重、合并、分类规则、种子数据
//! ├── ordering/      # 排序解析、乐观排序
//! ├── sync/          # 镜像、批量写入
//! ├── services/      # 目录视图、管理服务
//! └── utils/         # 日志、校验
//! ```

pub mod core;
pub mod db;
pub mod ordering;
pub mod services;
pub mod sync;
pub mod taxonomy;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, StoreSession};
pub use db::{CatalogStore, MemoryStore, RepoError, RepoResult, Subscription};
pub use ordering::{OptimisticOrder, Ordered, move_item, resolve_order};
pub use services::{AdminService, CatalogView};
pub use sync::{BatchWriter, DualStorePropagator, Mirrored};
pub use taxonomy::{BrandCatalog, ProductForm, is_member, reconcile_brands, route_form};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 加载 .env、读取配置并初始化日志
///
/// 文件日志位于 `{WORK_DIR}/logs`
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env();

    if config.log_to_file {
        let log_dir = config.log_dir();
        std::fs::create_dir_all(&log_dir)?;
        init_logger_with_file(&config.log_level, config.log_json, Some(&log_dir))?;
    } else {
        init_logger(&config.log_level, config.log_json)?;
    }

    tracing::info!(
        environment = %config.environment,
        batch_chunk_size = config.batch_chunk_size,
        snapshot_debounce_ms = config.snapshot_debounce_ms,
        "Catalog engine environment ready"
    );
    Ok(config)
}
