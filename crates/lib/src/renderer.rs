//! Builds the product listing and the cart listing from a loaded session.

use tracing::{debug, warn};

use crate::session::PageSession;
use crate::view::{CardControl, CartRow, CartView, NO_PRODUCTS_NOTICE};

/// Initial control for one product: quantity controls when the
/// authenticated user already has it in the cart, otherwise "Add to Cart".
pub fn initial_control(session: &PageSession, quantity: u32) -> CardControl {
  if session.is_authenticated() && quantity > 0 {
    CardControl::Quantity { quantity }
  } else {
    CardControl::AddButton
  }
}

/// Render one card per listed product, in listing order, then the badge.
pub fn render_catalog<V: CartView>(session: &PageSession, view: &mut V) {
  if session.products().is_empty() {
    view.show_notice(NO_PRODUCTS_NOTICE);
  } else {
    for product in session.products() {
      let quantity = session.cart().mirror().quantity(&product.id);
      view.push_card(product, initial_control(session, quantity));
    }
    debug!(cards = session.products().len(), "catalog rendered");
  }

  render_badge(session, view);
}

/// Render the cart listing: one row per mirrored item with a known product.
pub fn render_cart<V: CartView>(session: &PageSession, view: &mut V) {
  for (id, quantity) in session.cart().mirror().iter() {
    match session.product(id) {
      Some(product) => view.push_row(CartRow {
        id: id.clone(),
        name: product.name.clone(),
        quantity,
        subtotal: product.price * quantity,
        controls_enabled: true,
      }),
      None => warn!(product_id = %id, "cart item has no catalog entry, not shown"),
    }
  }

  let total = view.displayed_subtotals().into_iter().sum();
  view.set_cart_total(total);
  if view.row_count() == 0 {
    view.show_empty_cart();
  }

  render_badge(session, view);
}

fn render_badge<V: CartView>(session: &PageSession, view: &mut V) {
  let count = session
    .initial_badge()
    .unwrap_or_else(|| session.cart().mirror().total_items());
  session.set_badge(view, count);
}
