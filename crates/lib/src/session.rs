//! Per-page session context.
//!
//! A `PageSession` holds everything one page load knows: the backend client
//! (with the anti-forgery token read once from the cookie header), the
//! authentication status checked at load time, the product listing, and the
//! cart state. It lives exactly as long as the page and is passed
//! explicitly to the renderer, the sync engine and the page controllers.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::StoreClient;
use crate::catalog::{Category, ProductId, ProductSnapshot};
use crate::config::Config;
use crate::mirror::{BadgeCache, CartMirror};
use crate::money::Money;
use crate::sync::{CartState, Debouncer};
use crate::toast::Toaster;
use crate::view::CartView;

#[derive(Debug)]
pub struct PageSession {
  client: StoreClient,
  path: String,
  authenticated: bool,
  products: Vec<ProductSnapshot>,
  cart: CartState,
  initial_badge: Option<u32>,
  toaster: Toaster,
  debouncer: Debouncer,
  badge_cache: Option<BadgeCache>,
  empty_cart_redirect: Duration,
  order_redirect: Duration,
}

impl PageSession {
  /// An empty, anonymous session. Use [`load`](Self::load) to populate it
  /// from the backend.
  pub fn new(client: StoreClient, config: &Config, path: impl Into<String>) -> Self {
    Self {
      client,
      path: path.into(),
      authenticated: false,
      products: Vec::new(),
      cart: CartState::default(),
      initial_badge: None,
      toaster: Toaster::new(config.toast_duration()),
      debouncer: Debouncer::new(config.debounce()),
      badge_cache: None,
      empty_cart_redirect: config.empty_cart_redirect(),
      order_redirect: config.order_redirect(),
    }
  }

  pub fn with_badge_cache(mut self, cache: BadgeCache) -> Self {
    self.badge_cache = Some(cache);
    self
  }

  pub fn with_authenticated(mut self, authenticated: bool) -> Self {
    self.authenticated = authenticated;
    self
  }

  pub fn with_products(mut self, products: Vec<ProductSnapshot>) -> Self {
    self.products = products;
    self
  }

  pub fn with_cart(mut self, mirror: CartMirror) -> Self {
    self.cart = CartState::new(mirror);
    self
  }

  /// Populate the session the way a page load does.
  ///
  /// None of these fetches is fatal: a failed auth check means anonymous, a
  /// failed product fetch means an empty listing, a failed cart fetch means
  /// an empty cart, and a failed count keeps the cached badge.
  pub async fn load(mut self) -> Self {
    self.authenticated = match self.client.check_auth().await {
      Ok(authenticated) => authenticated,
      Err(e) => {
        warn!(error = %e, "auth check failed, continuing as anonymous");
        false
      }
    };

    let category = Category::from_path(&self.path);
    self.products = match self.client.products(category).await {
      Ok(products) => products,
      Err(e) => {
        warn!(error = %e, "failed to fetch products");
        Vec::new()
      }
    };

    let mirror = if self.authenticated {
      match self.client.cart_items().await {
        Ok(snapshot) => CartMirror::from_snapshot(snapshot),
        Err(e) => {
          warn!(error = %e, "failed to fetch cart items, proceeding without cart data");
          CartMirror::new()
        }
      }
    } else {
      CartMirror::new()
    };
    self.cart = CartState::new(mirror);

    self.initial_badge = match self.client.cart_count().await {
      Ok(count) => Some(count),
      Err(e) => {
        warn!(error = %e, "failed to fetch cart count");
        self.cached_badge()
      }
    };

    info!(
      path = %self.path,
      authenticated = self.authenticated,
      products = self.products.len(),
      cart_items = self.cart.mirror().len(),
      "page session loaded"
    );
    self
  }

  fn cached_badge(&self) -> Option<u32> {
    let cache = self.badge_cache.as_ref()?;
    match cache.load() {
      Ok(count) => Some(count),
      Err(e) => {
        warn!(error = %e, "ignoring unreadable badge cache");
        None
      }
    }
  }

  pub fn client(&self) -> &StoreClient {
    &self.client
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn is_authenticated(&self) -> bool {
    self.authenticated
  }

  pub fn products(&self) -> &[ProductSnapshot] {
    &self.products
  }

  pub fn product(&self, id: &ProductId) -> Option<&ProductSnapshot> {
    self.products.iter().find(|p| &p.id == id)
  }

  pub fn cart(&self) -> &CartState {
    &self.cart
  }

  pub(crate) fn cart_mut(&mut self) -> &mut CartState {
    &mut self.cart
  }

  pub fn initial_badge(&self) -> Option<u32> {
    self.initial_badge
  }

  pub fn toaster(&self) -> &Toaster {
    &self.toaster
  }

  pub(crate) fn debouncer_mut(&mut self) -> &mut Debouncer {
    &mut self.debouncer
  }

  pub fn empty_cart_redirect(&self) -> Duration {
    self.empty_cart_redirect
  }

  pub fn order_redirect(&self) -> Duration {
    self.order_redirect
  }

  /// Items and price of the mirrored cart, counting only products listed on
  /// this page.
  pub fn cart_bar_totals(&self) -> (u32, Money) {
    self
      .cart
      .mirror()
      .iter()
      .filter_map(|(id, qty)| self.product(id).map(|p| (qty, p.price * qty)))
      .fold((0, Money::ZERO), |(items, price), (qty, line)| (items + qty, price + line))
  }

  /// Show `count` in the badge, cache it, and refresh the cart bar.
  pub fn set_badge<V: CartView>(&self, view: &mut V, count: u32) {
    view.set_badge(count);
    if let Some(cache) = &self.badge_cache
      && let Err(e) = cache.store(count)
    {
      warn!(error = %e, "failed to cache badge count");
    }
    let (items, price) = self.cart_bar_totals();
    view.set_cart_bar(items, price);
    debug!(count, items, "cart count updated");
  }
}
