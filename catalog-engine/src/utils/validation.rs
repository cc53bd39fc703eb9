//! Input validation helpers
//!
//! Centralized text length constants and validation functions for admin
//! create/update payloads. The remote store enforces nothing, so limits
//! live here.

use rust_decimal::Decimal;
use shared::models::{BrandCreate, BrandUpdate, CategoryCreate, CategoryUpdate, ProductCreate, ProductUpdate};

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, brand, category
pub const MAX_NAME_LEN: usize = 200;

/// Slugs and category tags
pub const MAX_SLUG_LEN: usize = 100;

/// Taglines, capacity / range text
pub const MAX_SHORT_TEXT_LEN: usize = 200;

/// Descriptions and free-text details
pub const MAX_NOTE_LEN: usize = 5000;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Image references per product
pub const MAX_IMAGES: usize = 20;

// ── Generic helpers ─────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("price must not be negative (got {price})"),
        ));
    }
    Ok(())
}

fn validate_stock(quantity: i64) -> Result<(), AppError> {
    if quantity < 0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidStock,
            format!("stock_quantity must not be negative (got {quantity})"),
        ));
    }
    Ok(())
}

fn validate_images(images: &[String]) -> Result<(), AppError> {
    if images.len() > MAX_IMAGES {
        return Err(AppError::validation(format!(
            "too many images ({}, max {MAX_IMAGES})",
            images.len()
        )));
    }
    for image in images {
        validate_required_text(image, "image", MAX_URL_LEN)?;
    }
    Ok(())
}

// ── Payload validation ──────────────────────────────────────────────

pub fn validate_product_create(data: &ProductCreate) -> Result<(), AppError> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.category, "category", MAX_SLUG_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&data.details, "details", MAX_NOTE_LEN)?;
    validate_price(data.price)?;
    validate_stock(data.stock_quantity)?;
    validate_images(&data.images)
}

pub fn validate_product_update(data: &ProductUpdate) -> Result<(), AppError> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.category, "category", MAX_SLUG_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&data.details, "details", MAX_NOTE_LEN)?;
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    if let Some(quantity) = data.stock_quantity {
        validate_stock(quantity)?;
    }
    if let Some(images) = &data.images {
        validate_images(images)?;
    }
    Ok(())
}

pub fn validate_brand_create(data: &BrandCreate) -> Result<(), AppError> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    if let Some(id) = &data.id {
        validate_required_text(id, "id", MAX_SLUG_LEN)?;
    }
    validate_optional_text(&data.category, "category", MAX_SLUG_LEN)?;
    validate_optional_text(&data.tagline, "tagline", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&data.capacity, "capacity", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.image, "image", MAX_URL_LEN)
}

pub fn validate_brand_update(data: &BrandUpdate) -> Result<(), AppError> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.category, "category", MAX_SLUG_LEN)?;
    validate_optional_text(&data.tagline, "tagline", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&data.capacity, "capacity", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.image, "image", MAX_URL_LEN)
}

pub fn validate_category_create(data: &CategoryCreate) -> Result<(), AppError> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    if let Some(slug) = &data.slug {
        validate_required_text(slug, "slug", MAX_SLUG_LEN)?;
    }
    Ok(())
}

pub fn validate_category_update(data: &CategoryUpdate) -> Result<(), AppError> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(slug) = &data.slug {
        validate_required_text(slug, "slug", MAX_SLUG_LEN)?;
    }
    Ok(())
}
