//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   FilterState   │   │    PageState    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  search_text    │   │  current_page   │       │
//! │  │  category       │   │  category       │   │  page_size      │       │
//! │  │  title          │   │  price_range    │   │  (both >= 1)    │       │
//! │  │  price (Money)  │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │          ▲                                                              │
//! │          │ ingest (validation)                                          │
//! │  ┌───────┴─────────┐                                                    │
//! │  │  ProductRecord  │  wire shape of the store API (price: f64)          │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_positive, ValidationResult};
use crate::{DEFAULT_PAGE_SIZE, DEFAULT_PRICE_MAX};

// =============================================================================
// Product
// =============================================================================

/// Customer rating attached to a product by the store API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

/// A product offered in the catalog.
///
/// Products are ingested once per session and never mutated afterwards.
/// `description`, `image` and `rating` are passthrough data for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier assigned by the store API.
    pub id: u64,

    /// Category label, compared by exact equality.
    pub category: String,

    /// Display title, searched case-insensitively.
    pub title: String,

    /// Unit price, exactly as served.
    pub price: Money,

    pub description: String,

    /// Image URL.
    pub image: String,

    pub rating: Option<Rating>,
}

impl Product {
    /// Creates a product with empty passthrough fields.
    pub fn new(id: u64, category: impl Into<String>, title: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            category: category.into(),
            title: title.into(),
            price,
            description: String::new(),
            image: String::new(),
            rating: None,
        }
    }
}

/// A product exactly as the store API serves it.
///
/// ```json
/// { "id": 1, "title": "Fjallraven Backpack", "price": 109.95,
///   "description": "...", "category": "men's clothing",
///   "image": "https://...", "rating": { "rate": 3.9, "count": 120 } }
/// ```
///
/// Converted into a [`Product`] by [`crate::Catalog::ingest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}

// =============================================================================
// Category Filter
// =============================================================================

/// Category restriction of the catalog filter.
///
/// Serialized as a plain string: `"all"` or the category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Only products whose category equals this label exactly.
    Only(String),
}

impl CategoryFilter {
    /// Wire value meaning "no restriction".
    pub const ALL: &'static str = "all";

    /// Returns true if a product in `category` passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == CategoryFilter::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => CategoryFilter::ALL.to_string(),
            CategoryFilter::Only(name) => name,
        }
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price bounds.
///
/// `min > max` is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub const fn new(min: Money, max: Money) -> Self {
        PriceRange { min, max }
    }

    /// Returns true if `min <= price <= max`.
    #[inline]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    /// `[0, 1000]` in whole currency units.
    fn default() -> Self {
        PriceRange::new(Money::zero(), Money::new(DEFAULT_PRICE_MAX))
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// The current search/category/price predicate over the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FilterState {
    /// Case-insensitive substring of the title. Empty matches everything.
    pub search_text: String,

    #[ts(type = "string")]
    pub category: CategoryFilter,

    pub price_range: PriceRange,
}

impl FilterState {
    /// True when the category or price range differs from the defaults.
    ///
    /// Search text is not a "filter" here: clearing filters keeps it.
    pub fn has_active_filters(&self) -> bool {
        !self.category.is_all() || self.price_range != PriceRange::default()
    }

    /// Returns a copy with category and price range reset, search kept.
    pub fn cleared(&self) -> FilterState {
        FilterState {
            search_text: self.search_text.clone(),
            ..FilterState::default()
        }
    }
}

// =============================================================================
// Page State
// =============================================================================

/// Which slice of the filtered catalog is shown.
///
/// Both fields are at least 1; the constructors enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    /// Creates a page state, rejecting a zero page or page size.
    pub fn new(current_page: usize, page_size: usize) -> ValidationResult<Self> {
        validate_positive("page", current_page)?;
        validate_positive("page_size", page_size)?;
        Ok(PageState {
            current_page,
            page_size,
        })
    }

    /// First page with the given size.
    pub fn first(page_size: usize) -> ValidationResult<Self> {
        PageState::new(1, page_size)
    }

    /// Same page size, different page.
    pub fn with_page(&self, current_page: usize) -> ValidationResult<Self> {
        PageState::new(current_page, self.page_size)
    }

    /// Page 1 with the same size.
    pub fn reset(&self) -> Self {
        PageState {
            current_page: 1,
            page_size: self.page_size,
        }
    }

    #[inline]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first element of the current page.
    #[inline]
    pub fn offset(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
