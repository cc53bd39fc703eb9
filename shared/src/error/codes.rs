//! Unified error codes for the catalog engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (products, brands, categories, order lists)
//! - 7xxx: Sync errors (dual-store mirroring, batch commits)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Required field missing
    RequiredField = 7,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product has invalid stock quantity
    ProductInvalidStock = 6003,
    /// Brand not found
    BrandNotFound = 6101,
    /// Category not found
    CategoryNotFound = 6201,
    /// Category slug already exists in this store context
    CategorySlugExists = 6202,
    /// Reorder index outside the displayed sequence
    OrderIndexOutOfRange = 6301,

    // ==================== 7xxx: Sync ====================
    /// Mirrored record could not be created in the sibling store
    MirrorFailed = 7001,
    /// A batch chunk failed; earlier chunks stay committed
    BatchChunkFailed = 7101,
    /// Batch exceeds the backend batch-size limit
    BatchTooLarge = 7102,
    /// Store session is not active
    SessionClosed = 7201,

    // ==================== 9xxx: System ====================
    /// Remote store unreachable
    NetworkError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::RequiredField => "Required field is missing",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductInvalidStock => "Product has invalid stock quantity",
            ErrorCode::BrandNotFound => "Brand not found",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategorySlugExists => "Category slug already exists",
            ErrorCode::OrderIndexOutOfRange => "Reorder index is out of range",

            // Sync
            ErrorCode::MirrorFailed => "Failed to mirror record into sibling store",
            ErrorCode::BatchChunkFailed => "Batch chunk failed to commit",
            ErrorCode::BatchTooLarge => "Batch exceeds maximum batch size",
            ErrorCode::SessionClosed => "Store session is closed",

            // System
            ErrorCode::NetworkError => "Network error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            7 => Ok(ErrorCode::RequiredField),

            // Catalog
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductInvalidStock),
            6101 => Ok(ErrorCode::BrandNotFound),
            6201 => Ok(ErrorCode::CategoryNotFound),
            6202 => Ok(ErrorCode::CategorySlugExists),
            6301 => Ok(ErrorCode::OrderIndexOutOfRange),

            // Sync
            7001 => Ok(ErrorCode::MirrorFailed),
            7101 => Ok(ErrorCode::BatchChunkFailed),
            7102 => Ok(ErrorCode::BatchTooLarge),
            7201 => Ok(ErrorCode::SessionClosed),

            // System
            9003 => Ok(ErrorCode::NetworkError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
