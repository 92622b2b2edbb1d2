//! # Catalog State
//!
//! The session's product list plus the user's current filter and page.
//!
//! The product list is fixed after load. Filter and page are the only
//! mutable inputs; every read recomputes the view from scratch.

use std::sync::{Mutex, MutexGuard, PoisonError};

use storefront_core::validation::ValidationResult;
use storefront_core::{Catalog, CatalogPage, FilterState, PageState};

#[derive(Debug, Clone)]
struct ViewInputs {
    filter: FilterState,
    page: PageState,
}

/// Catalog plus view inputs.
#[derive(Debug)]
pub struct CatalogState {
    catalog: Catalog,
    inputs: Mutex<ViewInputs>,
}

impl CatalogState {
    /// Starts on page 1 with default filters.
    pub fn new(catalog: Catalog, page_size: usize) -> ValidationResult<Self> {
        Ok(CatalogState {
            catalog,
            inputs: Mutex::new(ViewInputs {
                filter: FilterState::default(),
                page: PageState::first(page_size)?,
            }),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> FilterState {
        self.lock().filter.clone()
    }

    pub fn page(&self) -> PageState {
        self.lock().page
    }

    /// Current page of the filtered catalog.
    pub fn view(&self) -> CatalogPage {
        let inputs = self.lock();
        self.catalog.view(&inputs.filter, &inputs.page)
    }

    /// Replaces the filter and returns to page 1.
    ///
    /// The core never clamps the page; going back to the first page on every
    /// filter change is how this shell keeps the page in range.
    pub fn update_filter<F>(&self, f: F) -> CatalogPage
    where
        F: FnOnce(&FilterState) -> FilterState,
    {
        let mut inputs = self.lock();
        inputs.filter = f(&inputs.filter);
        inputs.page = inputs.page.reset();
        self.catalog.view(&inputs.filter, &inputs.page)
    }

    /// Moves to `page`. A page past the end shows an empty list.
    pub fn set_page(&self, page: usize) -> ValidationResult<CatalogPage> {
        let mut inputs = self.lock();
        inputs.page = inputs.page.with_page(page)?;
        Ok(self.catalog.view(&inputs.filter, &inputs.page))
    }

    fn lock(&self) -> MutexGuard<'_, ViewInputs> {
        self.inputs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
