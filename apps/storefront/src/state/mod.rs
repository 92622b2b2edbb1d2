//! # State Module
//!
//! Manages application state for the storefront shell.
//!
//! ## Why Multiple State Types?
//! Instead of one struct with everything behind one lock, each concern has
//! its own state type and each command declares exactly what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ CatalogState │ │  CartState   │ │ SessionState │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │  Catalog     │ │  Arc<Mutex<  │ │  Session?    │ │  api url     │   │
//! │  │  + Mutex<    │ │    Cart      │ │  ThemeMode   │ │  page size   │   │
//! │  │  filter,page>│ │  >>          │ │  (Mutex)     │ │  currency    │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: product list immutable, view inputs behind a Mutex    │
//! │  • CartState: one Mutex per cart, value replaced whole                 │
//! │  • SessionState: Mutex around session + theme                          │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod session;

pub use cart::{CartState, CartUpdate};
pub use catalog::CatalogState;
pub use config::{ConfigError, ConfigState, DEFAULT_API_URL};
pub use session::{Session, SessionState, ThemeMode};
