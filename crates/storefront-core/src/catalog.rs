//! # Catalog Module
//!
//! Derives the filtered, paginated view over the session's product list.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Filter / Paginate                           │
//! │                                                                         │
//! │  products ──► filter(FilterState) ──► paginate(PageState) ──► page     │
//! │  (fetched      │ title ⊇ search         offset = (page-1) * size        │
//! │   once)        │ category == / all      len ≤ size                      │
//! │                │ min ≤ price ≤ max      out of range → empty            │
//! │                ▼                                                        │
//! │           total_pages = ceil(filtered / size)                           │
//! │                                                                         │
//! │  Recomputed whenever products, filter or page change. Nothing is        │
//! │  cached and nothing is clamped: a page past the end is simply empty.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{FilterState, PageState, Product, ProductRecord};
use crate::validation::validate_product_record;

// =============================================================================
// Pure Operations
// =============================================================================

/// Returns true if `product` passes every predicate of `filter`.
pub fn matches(product: &Product, filter: &FilterState) -> bool {
    Predicate::new(filter).matches(product)
}

/// Returns the products matching `filter`, in input order.
///
/// ## Example
/// ```rust
/// use storefront_core::catalog::filter;
/// use storefront_core::{FilterState, Money, Product};
///
/// let products = vec![
///     Product::new(1, "a", "Red Shoe", Money::from_cents(2000)),
///     Product::new(2, "b", "Blue Hat", Money::from_cents(500)),
/// ];
/// let state = FilterState { search_text: "SHOE".into(), ..FilterState::default() };
///
/// let hits = filter(&products, &state);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 1);
/// ```
pub fn filter<'a>(products: &'a [Product], filter: &FilterState) -> Vec<&'a Product> {
    let predicate = Predicate::new(filter);
    products.iter().filter(|p| predicate.matches(p)).collect()
}

/// Returns the slice of `filtered` selected by `page`.
///
/// A page past the end yields an empty slice. Callers own clamping.
pub fn paginate<'a, T>(filtered: &'a [T], page: &PageState) -> &'a [T] {
    let start = page.offset();
    if start >= filtered.len() {
        return &[];
    }
    let end = start.saturating_add(page.page_size()).min(filtered.len());
    &filtered[start..end]
}

/// Number of pages needed for `filtered_count` items.
///
/// Zero items means zero pages. A zero page size cannot be expressed by
/// [`PageState`]; passed directly it also yields zero.
pub fn total_pages(filtered_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    filtered_count.div_ceil(page_size)
}

/// Distinct categories in order of first appearance.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|p| seen.insert(p.category.as_str()))
        .map(|p| p.category.clone())
        .collect()
}

/// A filter with its search needle lowercased once.
struct Predicate<'f> {
    needle: String,
    filter: &'f FilterState,
}

impl<'f> Predicate<'f> {
    fn new(filter: &'f FilterState) -> Self {
        Predicate {
            needle: filter.search_text.to_lowercase(),
            filter,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        (self.needle.is_empty() || product.title.to_lowercase().contains(&self.needle))
            && self.filter.category.matches(&product.category)
            && self.filter.price_range.contains(product.price)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The product list of one session.
///
/// Read-only after construction; clones share the same storage.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            products: Arc::from(Vec::new()),
        }
    }
}

/// One computed page of the catalog view.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
}

impl Catalog {
    /// Builds a catalog from already-typed products.
    ///
    /// ## Errors
    /// [`CoreError::DuplicateProduct`] if two products share an id.
    pub fn from_products(products: Vec<Product>) -> CoreResult<Self> {
        let mut ids = HashSet::with_capacity(products.len());
        for product in &products {
            if !ids.insert(product.id) {
                return Err(CoreError::DuplicateProduct(product.id));
            }
        }
        Ok(Catalog {
            products: products.into(),
        })
    }

    /// Validates store API records and builds a catalog from them.
    ///
    /// Prices are kept at full precision. Titles and categories are taken
    /// as served, empty or long.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidProduct`] for the first record failing validation
    /// - [`CoreError::DuplicateProduct`] if two records share an id
    pub fn ingest(records: Vec<ProductRecord>) -> CoreResult<Self> {
        let products = records
            .into_iter()
            .map(|record| -> CoreResult<Product> {
                let price = validate_product_record(&record).map_err(|source| {
                    CoreError::InvalidProduct {
                        id: record.id,
                        source,
                    }
                })?;
                Ok(Product {
                    id: record.id,
                    category: record.category,
                    title: record.title,
                    price,
                    description: record.description,
                    image: record.image,
                    rating: record.rating,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Catalog::from_products(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn find(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by id, failing with [`CoreError::ProductNotFound`].
    pub fn get(&self, id: u64) -> CoreResult<&Product> {
        self.find(id).ok_or(CoreError::ProductNotFound(id))
    }

    /// Distinct categories in feed order.
    pub fn categories(&self) -> Vec<String> {
        categories(&self.products)
    }

    /// Filters, counts and slices the catalog in one pass.
    pub fn view(&self, filter_state: &FilterState, page: &PageState) -> CatalogPage {
        let filtered = filter(&self.products, filter_state);
        let items = paginate(&filtered, page)
            .iter()
            .map(|p| (*p).clone())
            .collect();

        CatalogPage {
            items,
            current_page: page.current_page(),
            page_size: page.page_size(),
            total_pages: total_pages(filtered.len(), page.page_size()),
            filtered_count: filtered.len(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
