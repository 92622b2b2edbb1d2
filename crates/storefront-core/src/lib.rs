//! # storefront-core: Pure Catalog & Cart Engine
//!
//! This crate is the **heart** of the storefront. It contains the catalog
//! filter/paginate engine and the cart aggregate as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (JSON / web frontend)              │   │
//! │  │    Product Grid ──► Filters ──► Pagination ──► Cart Drawer      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               apps/storefront (shell)                           │   │
//! │  │    product source, session, add_to_cart, set_page, ...          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │  filter   │  │   Cart    │  │ feed rules│  │   │
//! │  │   │FilterState│  │  paginate │  │ CartLine  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, FilterState, PageState)
//! - [`catalog`] - Filtering, pagination, and the per-session catalog
//! - [`cart`] - Quantity-merging cart with copy-on-write updates
//! - [`money`] - Full-precision money, rounded only for display
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation (feed records, user input)
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, Product};
//!
//! let shoe = Product::new(1, "a", "Red Shoe", Money::from_cents(2000));
//!
//! let cart = Cart::new().add(&shoe).add(&shoe);
//! assert_eq!(cart.total_item_count(), 2);
//! assert_eq!(cart.total_price(), Money::from_cents(4000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use catalog::{Catalog, CatalogPage};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of products shown per catalog page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Upper bound of the default price filter, in whole currency units.
///
/// The price slider in the storefront spans `[0, 1000]`; a filter still at
/// these bounds is not considered "active".
pub const DEFAULT_PRICE_MAX: f64 = 1000.0;

/// Longest accepted search query, in characters.
pub const MAX_SEARCH_LENGTH: usize = 100;
