//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐                               │
//! │  │  Empty   │───────────────►│ In Cart  │◄──┐ add_to_cart (amount + 1)  │
//! │  │  Cart    │◄───────────────│          │───┘ remove_from_cart (− 1)    │
//! │  └──────────┘  clear_cart    └──────────┘                               │
//! │       ▲        logout             │                                     │
//! │       └───────────────────────────┘ remove_from_cart of the last unit   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{Cart, CartLine, CartTotals};
use tracing::debug;

use super::require_session;
use crate::error::ApiError;
use crate::state::{CartState, CartUpdate, CatalogState, ConfigState, SessionState};

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,

    /// `totals.total_price` formatted for display.
    pub formatted_total: String,

    /// False when the command left the cart as it was.
    pub changed: bool,
}

impl CartResponse {
    fn new(cart: &Cart, changed: bool, config: &ConfigState) -> Self {
        let totals = CartTotals::from(cart);
        CartResponse {
            items: cart.lines().to_vec(),
            formatted_total: config.format_currency(totals.total_price),
            totals,
            changed,
        }
    }

    fn from_update(update: &CartUpdate, config: &ConfigState) -> Self {
        CartResponse::new(&update.cart, update.changed, config)
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with lines in first-add order and calculated totals
pub fn get_cart(
    session: &SessionState,
    cart: &CartState,
    config: &ConfigState,
) -> Result<CartResponse, ApiError> {
    require_session(session)?;
    debug!("get_cart command");
    Ok(cart.with_cart(|c| CartResponse::new(c, false, config)))
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - Product already in cart: its amount increases by 1
/// - Product not in cart: appended with amount 1
/// - Unknown id: `NOT_FOUND`, cart untouched
pub fn add_to_cart(
    session: &SessionState,
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    product_id: u64,
) -> Result<CartResponse, ApiError> {
    require_session(session)?;
    debug!(product_id = product_id, "add_to_cart command");

    let product = catalog.catalog().get(product_id)?;
    let update = cart.update(|c| c.add(product));
    Ok(CartResponse::from_update(&update, config))
}

/// Removes one unit of a product from the cart.
///
/// Removing a product that is not in the cart is not an error; the response
/// carries `changed: false`.
pub fn remove_from_cart(
    session: &SessionState,
    cart: &CartState,
    config: &ConfigState,
    product_id: u64,
) -> Result<CartResponse, ApiError> {
    require_session(session)?;
    debug!(product_id = product_id, "remove_from_cart command");

    let update = cart.update(|c| c.remove(product_id));
    Ok(CartResponse::from_update(&update, config))
}

/// Clears all lines from the cart.
pub fn clear_cart(
    session: &SessionState,
    cart: &CartState,
    config: &ConfigState,
) -> Result<CartResponse, ApiError> {
    require_session(session)?;
    debug!("clear_cart command");

    let update = cart.update(Cart::clear);
    Ok(CartResponse::from_update(&update, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::Session;
    use storefront_core::{Catalog, Money, Product};

    struct Fixture {
        session: SessionState,
        catalog: CatalogState,
        cart: CartState,
        config: ConfigState,
    }

    fn fixture() -> Fixture {
        let catalog = Catalog::from_products(vec![
            Product::new(1, "a", "Red Shoe", Money::from_cents(2000)),
            Product::new(2, "b", "Blue Hat", Money::from_cents(500)),
        ])
        .unwrap();
        let session = SessionState::new();
        session.start(Session::new("tester", "token"));
        Fixture {
            session,
            catalog: CatalogState::new(catalog, 9).unwrap(),
            cart: CartState::new(),
            config: ConfigState::default(),
        }
    }

    #[test]
    fn test_add_merges_quantities() {
        let f = fixture();
        add_to_cart(&f.session, &f.catalog, &f.cart, &f.config, 1).unwrap();
        add_to_cart(&f.session, &f.catalog, &f.cart, &f.config, 2).unwrap();
        let resp = add_to_cart(&f.session, &f.catalog, &f.cart, &f.config, 1).unwrap();

        assert!(resp.changed);
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].product.id, 1);
        assert_eq!(resp.items[0].amount, 2);
        assert_eq!(resp.totals.total_item_count, 3);
        assert_eq!(resp.totals.total_price.cents(), 4500);
        assert_eq!(resp.formatted_total, "$45.00");
    }

    #[test]
    fn test_add_unknown_product() {
        let f = fixture();
        let err = add_to_cart(&f.session, &f.catalog, &f.cart, &f.config, 99).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(f.cart.snapshot().is_empty());
    }

    #[test]
    fn test_remove_absent_is_unchanged() {
        let f = fixture();
        add_to_cart(&f.session, &f.catalog, &f.cart, &f.config, 1).unwrap();

        let resp = remove_from_cart(&f.session, &f.cart, &f.config, 2).unwrap();
        assert!(!resp.changed);
        assert_eq!(resp.totals.total_item_count, 1);

        let resp = remove_from_cart(&f.session, &f.cart, &f.config, 1).unwrap();
        assert!(resp.changed);
        assert!(resp.items.is_empty());
    }

    #[test]
    fn test_clear_and_get() {
        let f = fixture();
        add_to_cart(&f.session, &f.catalog, &f.cart, &f.config, 2).unwrap();
        clear_cart(&f.session, &f.cart, &f.config).unwrap();

        let resp = get_cart(&f.session, &f.cart, &f.config).unwrap();
        assert!(resp.items.is_empty());
        assert_eq!(resp.totals.total_item_count, 0);
        assert_eq!(resp.formatted_total, "$0.00");
    }

    #[test]
    fn test_cart_requires_session() {
        let f = fixture();
        f.session.end();
        let err = get_cart(&f.session, &f.cart, &f.config).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
