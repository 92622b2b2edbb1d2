//! # Commands Module
//!
//! Every operation the shell exposes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, session guard)
//! ├── catalog.rs  ◄─── Search, filters, paging, categories
//! ├── cart.rs     ◄─── Cart manipulation
//! └── session.rs  ◄─── Signup, login, logout, theme
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin: "add 3"                                                         │
//! │         │                                                               │
//! │         │ (shell::Command::parse)                                       │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      &SessionState,   ◄── explicit, no globals                          │
//! │      &CatalogState,                                                     │
//! │      &CartState,                                                        │
//! │      product_id: 3,                                                     │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  stdout: { "ok": true, "data": { "items": [...], "totals": {...} } }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! fn toggle_theme(session: &SessionState)
//!
//! // Needs the catalog to resolve the id, and the cart to update
//! fn add_to_cart(session: &SessionState, catalog: &CatalogState, cart: &CartState, ...)
//! ```
//!
//! Catalog and cart commands require a logged-in session.

pub mod cart;
pub mod catalog;
pub mod session;

pub use cart::*;
pub use catalog::*;
pub use session::*;

use crate::error::ApiError;
use crate::state::{Session, SessionState};

/// Returns the active session or an `UNAUTHORIZED` error.
pub(crate) fn require_session(session: &SessionState) -> Result<Session, ApiError> {
    session
        .current()
        .ok_or_else(|| ApiError::unauthorized("Login required"))
}
