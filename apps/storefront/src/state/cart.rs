//! # Cart State
//!
//! Holds the session's current cart.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>`: one mutual-exclusion boundary per
//! cart. Every core operation is short and total, so holding the lock for
//! the whole read-modify-replace is cheap.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command                  Core Operation          Stored Cart           │
//! │  ───────                  ──────────────          ───────────           │
//! │                                                                         │
//! │  add_to_cart() ─────────► cart.add(&p) ─────────► replaced              │
//! │  remove_from_cart() ────► cart.remove(id) ──────► replaced (or same)    │
//! │  clear_cart() ──────────► cart.clear() ─────────► replaced              │
//! │  get_cart() ────────────► (read only)                                   │
//! │                                                                         │
//! │  The core never mutates a cart in place; the state swaps the stored     │
//! │  value and reports whether the new one is a different cart.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::Cart;

/// Result of replacing the stored cart.
#[derive(Debug, Clone)]
pub struct CartUpdate {
    pub cart: Cart,
    /// False when the operation returned the very same cart.
    pub changed: bool,
}

/// Shared cart state.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock())
    }

    /// Replaces the cart with the result of `f`.
    ///
    /// ## Usage
    /// ```rust
    /// use storefront_core::{Money, Product};
    /// use storefront_lib::state::CartState;
    ///
    /// let state = CartState::new();
    /// let hat = Product::new(2, "b", "Blue Hat", Money::from_cents(500));
    ///
    /// let update = state.update(|cart| cart.add(&hat));
    /// assert!(update.changed);
    /// assert_eq!(update.cart.total_item_count(), 1);
    /// ```
    pub fn update<F>(&self, f: F) -> CartUpdate
    where
        F: FnOnce(&Cart) -> Cart,
    {
        let mut guard = self.lock();
        let next = f(&guard);
        let changed = !Cart::ptr_eq(&guard, &next);
        *guard = next.clone();
        CartUpdate {
            cart: next,
            changed,
        }
    }

    /// A snapshot of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    // A panic while holding the lock cannot leave a half-updated cart: the
    // stored value is only ever replaced whole.
    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
