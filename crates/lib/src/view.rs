//! The page surface the sync engine reconciles.
//!
//! `CartView` is the narrow set of page mutations the engine and page
//! controllers perform. `PageModel` implements it in memory; a terminal or
//! browser front end renders from the model.

use serde::Serialize;
use tracing::{debug, error};

use crate::catalog::{ProductId, ProductSnapshot};
use crate::money::Money;

pub const NO_PRODUCTS_NOTICE: &str = "No products available at the moment. Please try again later.";
pub const EMPTY_CART_NOTICE: &str = "Your cart is empty.";

/// Cart control shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardControl {
  AddButton,
  Quantity { quantity: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
  pub product: ProductSnapshot,
  pub control: CardControl,
  pub controls_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRow {
  pub id: ProductId,
  pub name: String,
  pub quantity: u32,
  pub subtotal: Money,
  pub controls_enabled: bool,
}

/// The floating "view cart" bar on listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartBar {
  pub items: u32,
  pub price: Money,
  pub hidden: bool,
}

impl Default for CartBar {
  fn default() -> Self {
    Self {
      items: 0,
      price: Money::ZERO,
      hidden: true,
    }
  }
}

impl CartBar {
  pub fn items_label(&self) -> String {
    format!("{} item{}", self.items, if self.items == 1 { "" } else { "s" })
  }

  pub fn price_label(&self) -> String {
    self.price.to_string()
  }
}

pub trait CartView {
  fn set_badge(&mut self, count: u32);
  fn set_cart_bar(&mut self, items: u32, price: Money);

  fn push_card(&mut self, product: &ProductSnapshot, control: CardControl);
  fn show_notice(&mut self, message: &str);
  fn set_card_control(&mut self, id: &ProductId, control: CardControl);
  fn card_control(&self, id: &ProductId) -> Option<CardControl>;

  fn push_row(&mut self, row: CartRow);
  fn has_row(&self, id: &ProductId) -> bool;
  fn update_row(&mut self, id: &ProductId, quantity: u32, subtotal: Money);
  fn remove_row(&mut self, id: &ProductId);
  fn row_count(&self) -> usize;
  fn displayed_subtotals(&self) -> Vec<Money>;
  fn set_cart_total(&mut self, total: Money);
  /// Whether this page is the cart listing (rows, total, empty state).
  fn is_cart_listing(&self) -> bool;
  fn show_empty_cart(&mut self);

  /// Disable the increment/decrement controls for one product everywhere
  /// they appear.
  fn disable_item_controls(&mut self, id: &ProductId);
  /// False once any control for the product has been disabled.
  fn controls_enabled(&self, id: &ProductId) -> bool;

  fn navigate(&mut self, location: &str);
}

/// A navigation the page performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
  pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageModel {
  pub path: String,
  pub badge: String,
  pub cards: Vec<ProductCard>,
  pub notice: Option<String>,
  pub rows: Vec<CartRow>,
  pub cart_total: Option<Money>,
  pub cart_listing: bool,
  pub cart_bar: CartBar,
  pub navigations: Vec<Navigation>,
}

impl PageModel {
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      badge: "0".to_string(),
      ..Self::default()
    }
  }

  /// A cart listing page: rows, a total and an empty state.
  pub fn cart_page(path: impl Into<String>) -> Self {
    Self {
      cart_listing: true,
      cart_total: Some(Money::ZERO),
      ..Self::new(path)
    }
  }

  pub fn card(&self, id: &ProductId) -> Option<&ProductCard> {
    self.cards.iter().find(|card| &card.product.id == id)
  }

  pub fn row(&self, id: &ProductId) -> Option<&CartRow> {
    self.rows.iter().find(|row| &row.id == id)
  }

  pub fn last_navigation(&self) -> Option<&str> {
    self.navigations.last().map(|nav| nav.location.as_str())
  }
}

impl CartView for PageModel {
  fn set_badge(&mut self, count: u32) {
    self.badge = count.to_string();
  }

  fn set_cart_bar(&mut self, items: u32, price: Money) {
    self.cart_bar = CartBar {
      items,
      price,
      hidden: items == 0,
    };
  }

  fn push_card(&mut self, product: &ProductSnapshot, control: CardControl) {
    self.cards.push(ProductCard {
      product: product.clone(),
      control,
      controls_enabled: true,
    });
  }

  fn show_notice(&mut self, message: &str) {
    self.notice = Some(message.to_string());
  }

  fn set_card_control(&mut self, id: &ProductId, control: CardControl) {
    match self.cards.iter_mut().find(|card| &card.product.id == id) {
      Some(card) => {
        // A fresh control replaces the old one, so it starts enabled.
        if card.control != control {
          card.controls_enabled = true;
        }
        card.control = control;
      }
      None => debug!(product_id = %id, "no card on page for product"),
    }
  }

  fn card_control(&self, id: &ProductId) -> Option<CardControl> {
    self.card(id).map(|card| card.control)
  }

  fn push_row(&mut self, row: CartRow) {
    self.rows.push(row);
  }

  fn has_row(&self, id: &ProductId) -> bool {
    self.row(id).is_some()
  }

  fn update_row(&mut self, id: &ProductId, quantity: u32, subtotal: Money) {
    match self.rows.iter_mut().find(|row| &row.id == id) {
      Some(row) => {
        row.quantity = quantity;
        row.subtotal = subtotal;
      }
      None => error!(product_id = %id, "cart item not found"),
    }
  }

  fn remove_row(&mut self, id: &ProductId) {
    self.rows.retain(|row| &row.id != id);
  }

  fn row_count(&self) -> usize {
    self.rows.len()
  }

  fn displayed_subtotals(&self) -> Vec<Money> {
    self.rows.iter().map(|row| row.subtotal).collect()
  }

  fn set_cart_total(&mut self, total: Money) {
    self.cart_total = Some(total);
  }

  fn is_cart_listing(&self) -> bool {
    self.cart_listing
  }

  fn show_empty_cart(&mut self) {
    self.notice = Some(EMPTY_CART_NOTICE.to_string());
  }

  fn disable_item_controls(&mut self, id: &ProductId) {
    for row in self.rows.iter_mut().filter(|row| &row.id == id) {
      row.controls_enabled = false;
    }
    for card in self.cards.iter_mut().filter(|card| &card.product.id == id) {
      card.controls_enabled = false;
    }
  }

  fn controls_enabled(&self, id: &ProductId) -> bool {
    let rows = self.rows.iter().filter(|row| &row.id == id).all(|row| row.controls_enabled);
    let cards = self
      .cards
      .iter()
      .filter(|card| &card.product.id == id)
      .all(|card| card.controls_enabled);
    rows && cards
  }

  fn navigate(&mut self, location: &str) {
    debug!(location = %location, "navigating");
    self.navigations.push(Navigation {
      location: location.to_string(),
    });
  }
}
