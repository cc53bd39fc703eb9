//! 双门店同步
//!
//! - [`propagator`] - 新建记录镜像到兄弟门店
//! - [`batch`] - 分块批量写入

pub mod batch;
pub mod propagator;

pub use batch::BatchWriter;
pub use propagator::{
    DualStorePropagator, Mirrored, mirror_brand_payload, mirror_category_payload,
    mirror_product_payload,
};
