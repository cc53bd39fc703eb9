//! 分类体系 - 纯函数
//!
//! - [`normalize`] - 分类名归一化与去重
//! - [`reconcile`] - 种子品牌与动态品牌合并
//! - [`classifier`] - 分类归属判定与编辑表单路由
//! - [`seed`] - 内置种子目录

pub mod classifier;
pub mod normalize;
pub mod reconcile;
pub mod seed;

pub use classifier::{
    FORM_RULES, FormInput, MEMBERSHIP_RULES, ProductForm, is_member, route_form,
};
pub use normalize::{dedupe_categories, normalize_brand_name, normalize_name};
pub use reconcile::{BrandCatalog, BrandSource, reconcile_brands};
pub use seed::{SEED_BRANDS, seed_categories};
