//! # Validation Module
//!
//! Input validation at the edges of the core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Product feed (store API / JSON file)                          │
//! │  ├── Type validation (serde deserialization)                            │
//! │  └── THIS MODULE: price → Money (finite, non-negative)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Shell commands                                                │
//! │  ├── Search query length, page numbers                                  │
//! │  └── THIS MODULE: login credentials                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog + cart engine                                         │
//! │  └── Total: every input already has a defined result                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_price, validate_search_query};
//!
//! let price = validate_price(109.95).unwrap();
//! assert_eq!(price.cents(), 10995);
//!
//! assert!(validate_search_query("backpack").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductRecord;
use crate::MAX_SEARCH_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category label typed by the user.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum [`MAX_SEARCH_LENGTH`] characters
///
/// The query is returned as given; whitespace is significant to substring
/// matching and is not trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    if query.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(query.to_string())
}

/// Validates login credentials.
///
/// ## Rules
/// - Username and password must both be non-empty
pub fn validate_credentials(username: &str, password: &str) -> ValidationResult<()> {
    if username.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    Ok(())
}

/// Validates the signup form: credentials plus an email address.
pub fn validate_signup(username: &str, email: &str, password: &str) -> ValidationResult<()> {
    validate_credentials(username, password)?;

    if email.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a count-like value is at least 1.
pub fn validate_positive(field: &str, value: usize) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Converts a decimal price into [`Money`] without rounding.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (zero is a free item)
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::validate_price;
///
/// assert_eq!(validate_price(22.3).unwrap().cents(), 2230);
/// assert_eq!(validate_price(0.004).unwrap(), Money::new(0.004));
/// assert_eq!(validate_price(0.0).unwrap().cents(), 0);
/// assert!(validate_price(-1.0).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<Money> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(Money::new(price))
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a feed record and returns its price.
///
/// Only the price is checked. Titles and categories are display data and
/// are kept as served, even when empty.
pub fn validate_product_record(record: &ProductRecord) -> ValidationResult<Money> {
    validate_price(record.price)
}

// =============================================================================
// Unit Tests
// =============================================================================
