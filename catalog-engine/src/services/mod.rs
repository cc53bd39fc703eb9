//! 服务层
//!
//! - [`CatalogView`] - 每个快照重算的合并目录视图
//! - [`AdminService`] - 管理端增删改、镜像、批量与排序提交

pub mod admin;
pub mod catalog_view;

pub use admin::AdminService;
pub use catalog_view::CatalogView;
