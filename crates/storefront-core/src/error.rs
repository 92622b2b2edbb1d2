//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── CoreError        - Feed ingestion and lookup failures              │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  storefront app errors (separate crate)                                 │
//! │  ├── SourceError      - Product fetch / file load failures              │
//! │  └── ApiError         - What the presentation layer sees (serialized)   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Presentation            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog and cart operations themselves never fail: every input, including
//! out-of-range pages and removal of absent ids, has a defined result. Errors
//! only arise where data enters the core.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not part of the session catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    /// The product feed contains the same id twice.
    ///
    /// A cart line is keyed by product id, so ambiguous ids would make
    /// quantity merging meaningless.
    #[error("Duplicate product id in feed: {0}")]
    DuplicateProduct(u64),

    /// A feed record failed validation.
    #[error("Invalid product {id}: {source}")]
    InvalidProduct {
        id: u64,
        #[source]
        source: ValidationError,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
