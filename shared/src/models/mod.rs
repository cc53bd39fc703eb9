//! Data models shared by the catalog engine and its persistence collaborators

pub mod brand;
pub mod category;
pub mod order_list;
pub mod product;
pub mod store_context;

pub use brand::{Brand, BrandCreate, BrandUpdate, CanonicalBrand};
pub use category::{Category, CategoryCreate, CategoryUpdate, slugify};
pub use order_list::{EntityKind, OrderScope};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use store_context::StoreContext;
