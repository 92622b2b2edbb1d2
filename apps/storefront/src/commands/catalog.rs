//! # Catalog Commands
//!
//! Search, category and price filters, paging.
//!
//! ## Catalog Screen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ search............ ]   Category: [all ▾]   Price: [0] ─── [1000]     │
//! │                                                                         │
//! │  ┌───────────┐ ┌───────────┐ ┌───────────┐                              │
//! │  │ product 1 │ │ product 2 │ │ product 3 │   page_size items per page   │
//! │  └───────────┘ └───────────┘ └───────────┘                              │
//! │                                                                         │
//! │                    « 1 [2] 3 »   (total_pages)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every filter change returns to page 1. `set_page` does not clamp: a page
//! past the end shows an empty grid.

use serde::Serialize;
use storefront_core::validation::{validate_category, validate_search_query};
use storefront_core::{CatalogPage, CategoryFilter, FilterState, Money, PriceRange};
use tracing::debug;

use super::require_session;
use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};

/// The visible page together with the inputs that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub page: CatalogPage,
    pub filter: FilterState,
    /// Whether "Clear filters" should be offered.
    pub has_active_filters: bool,
}

impl CatalogResponse {
    fn new(page: CatalogPage, filter: FilterState) -> Self {
        CatalogResponse {
            has_active_filters: filter.has_active_filters(),
            page,
            filter,
        }
    }

    fn current(catalog: &CatalogState) -> Self {
        CatalogResponse::new(catalog.view(), catalog.filter())
    }
}

/// Gets the current catalog page.
pub fn get_catalog(
    session: &SessionState,
    catalog: &CatalogState,
) -> Result<CatalogResponse, ApiError> {
    require_session(session)?;
    debug!("get_catalog command");
    Ok(CatalogResponse::current(catalog))
}

/// Sets the title search text.
///
/// The text is matched as-is (case-insensitive, not trimmed); an empty
/// string matches every title.
pub fn search(
    session: &SessionState,
    catalog: &CatalogState,
    text: &str,
) -> Result<CatalogResponse, ApiError> {
    require_session(session)?;
    debug!(text = %text, "search command");

    let search_text = validate_search_query(text)?;
    let page = catalog.update_filter(|f| FilterState {
        search_text,
        ..f.clone()
    });
    Ok(CatalogResponse::new(page, catalog.filter()))
}

/// Restricts the catalog to one category, or `"all"`.
///
/// ## Arguments
/// * `category` - Exact category label (case-sensitive), or `all`
pub fn set_category(
    session: &SessionState,
    catalog: &CatalogState,
    category: &str,
) -> Result<CatalogResponse, ApiError> {
    require_session(session)?;
    debug!(category = %category, "set_category command");

    validate_category(category)?;
    let page = catalog.update_filter(|f| FilterState {
        category: CategoryFilter::from(category),
        ..f.clone()
    });
    Ok(CatalogResponse::new(page, catalog.filter()))
}

/// Sets the inclusive price bounds.
///
/// `min > max` is accepted and yields an empty catalog.
pub fn set_price_range(
    session: &SessionState,
    catalog: &CatalogState,
    min: Money,
    max: Money,
) -> Result<CatalogResponse, ApiError> {
    require_session(session)?;
    debug!(min = %min, max = %max, "set_price_range command");

    let page = catalog.update_filter(|f| FilterState {
        price_range: PriceRange::new(min, max),
        ..f.clone()
    });
    Ok(CatalogResponse::new(page, catalog.filter()))
}

/// Resets category and price range. The search text stays.
pub fn clear_filters(
    session: &SessionState,
    catalog: &CatalogState,
) -> Result<CatalogResponse, ApiError> {
    require_session(session)?;
    debug!("clear_filters command");

    let page = catalog.update_filter(FilterState::cleared);
    Ok(CatalogResponse::new(page, catalog.filter()))
}

/// Moves to a 1-based page.
pub fn set_page(
    session: &SessionState,
    catalog: &CatalogState,
    page: usize,
) -> Result<CatalogResponse, ApiError> {
    require_session(session)?;
    debug!(page = page, "set_page command");

    let view = catalog.set_page(page)?;
    Ok(CatalogResponse::new(view, catalog.filter()))
}

/// Distinct categories in first-seen order.
pub fn list_categories(
    session: &SessionState,
    catalog: &CatalogState,
) -> Result<Vec<String>, ApiError> {
    require_session(session)?;
    debug!("list_categories command");
    Ok(catalog.catalog().categories())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::Session;
    use storefront_core::{Catalog, Product};

    fn fixture() -> (SessionState, CatalogState) {
        let catalog = Catalog::from_products(vec![
            Product::new(1, "a", "Red Shoe", Money::from_cents(2000)),
            Product::new(2, "b", "Blue Hat", Money::from_cents(500)),
            Product::new(3, "a", "Red Scarf", Money::from_cents(1500)),
            Product::new(4, "b", "Green Hat", Money::from_cents(800)),
        ])
        .unwrap();
        let session = SessionState::new();
        session.start(Session::new("tester", "token"));
        (session, CatalogState::new(catalog, 2).unwrap())
    }

    #[test]
    fn test_requires_session() {
        let (session, catalog) = fixture();
        session.end();

        let err = get_catalog(&session, &catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        let err = search(&session, &catalog, "red").unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_search_and_category() {
        let (session, catalog) = fixture();

        let resp = search(&session, &catalog, "RED").unwrap();
        assert_eq!(resp.page.filtered_count, 2);
        assert!(!resp.has_active_filters);

        let resp = set_category(&session, &catalog, "b").unwrap();
        assert_eq!(resp.page.filtered_count, 0);
        assert!(resp.has_active_filters);

        let resp = search(&session, &catalog, "").unwrap();
        assert_eq!(resp.page.filtered_count, 2);
        assert_eq!(resp.filter.category, CategoryFilter::from("b"));
    }

    #[test]
    fn test_empty_category_rejected() {
        let (session, catalog) = fixture();
        let err = set_category(&session, &catalog, "").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_price_range_and_clear() {
        let (session, catalog) = fixture();
        search(&session, &catalog, "hat").unwrap();

        let resp =
            set_price_range(&session, &catalog, Money::from_cents(600), Money::from_cents(900))
                .unwrap();
        assert_eq!(resp.page.filtered_count, 1);
        assert_eq!(resp.page.items[0].id, 4);

        let resp =
            set_price_range(&session, &catalog, Money::from_cents(900), Money::from_cents(600))
                .unwrap();
        assert_eq!(resp.page.filtered_count, 0);

        let resp = clear_filters(&session, &catalog).unwrap();
        assert_eq!(resp.filter.search_text, "hat");
        assert_eq!(resp.page.filtered_count, 2);
        assert!(!resp.has_active_filters);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let (session, catalog) = fixture();
        let resp = set_page(&session, &catalog, 2).unwrap();
        assert_eq!(resp.page.current_page, 2);
        assert_eq!(resp.page.items.len(), 2);

        let resp = set_category(&session, &catalog, "a").unwrap();
        assert_eq!(resp.page.current_page, 1);
    }

    #[test]
    fn test_set_page_past_end_and_zero() {
        let (session, catalog) = fixture();
        let resp = set_page(&session, &catalog, 9).unwrap();
        assert!(resp.page.items.is_empty());
        assert_eq!(resp.page.total_pages, 2);

        let err = set_page(&session, &catalog, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_list_categories() {
        let (session, catalog) = fixture();
        assert_eq!(list_categories(&session, &catalog).unwrap(), vec!["a", "b"]);
    }
}
