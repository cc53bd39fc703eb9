//! 核心模块 - 引擎配置与门店会话
//!
//! # 模块结构
//!
//! - [`Config`] - 引擎配置
//! - [`StoreSession`] - 门店上下文会话 (订阅、重算、切换)

pub mod config;
pub mod session;

pub use config::{Config, DEFAULT_BATCH_CHUNK_SIZE};
pub use session::StoreSession;
