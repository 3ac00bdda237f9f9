use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::debounce::Control;
use super::outcome::{Confirmation, MutationOutcome};
use super::state::Intent;
use crate::api::{QuantityAction, login_location};
use crate::catalog::ProductId;
use crate::consts::CART_PATH;
use crate::money::Money;
use crate::session::PageSession;
use crate::view::{CardControl, CartView};

/// User-facing texts of the cart flows.
pub mod messages {
  pub const SESSION_ERROR: &str = "Session error. Please refresh the page or log in again.";
  pub const LOGIN_TO_ADD: &str = "Please log in to add items to your cart.";
  pub const ADDED: &str = "Item added to cart!";
  pub const INCREASED: &str = "Item quantity increased!";
  pub const DECREASED: &str = "Item quantity decreased!";
  pub const ADD_FAILED: &str = "Failed to add item to cart.";
  pub const UPDATE_FAILED: &str = "Failed to update quantity.";
  pub const SOMETHING_WRONG: &str = "Something went wrong. Please try again.";
  pub const CART_UPDATE_FAILED: &str = "Failed to update cart";
  pub const SERVER_UNREACHABLE: &str = "Failed to communicate with the server. Please try again.";
  pub const UNEXPECTED: &str = "An unexpected error occurred. Please try again.";
}

const ADDED_REPLY: &str = "Added";
const UPDATED_REPLY: &str = "Updated";

/// Why a mutation was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Blocked {
  /// The session has no anti-forgery token.
  MissingToken,
  /// The page loaded without an authenticated session.
  NotAuthenticated,
  /// An earlier reply carried an `error`, disabling the item's controls.
  ControlsDisabled,
}

/// What became of one user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "dispatch", content = "detail", rename_all = "snake_case")]
pub enum Dispatch {
  Sent(MutationOutcome),
  /// Dropped by the per-control debounce window.
  Debounced,
  Blocked(Blocked),
}

impl Dispatch {
  pub fn outcome(&self) -> Option<&MutationOutcome> {
    match self {
      Dispatch::Sent(outcome) => Some(outcome),
      _ => None,
    }
  }
}

/// Cart mutations against one page session and its view.
pub struct CartSync<'a, V: CartView> {
  session: &'a mut PageSession,
  view: &'a mut V,
}

impl<'a, V: CartView> CartSync<'a, V> {
  pub fn new(session: &'a mut PageSession, view: &'a mut V) -> Self {
    Self { session, view }
  }

  /// Auth and anti-forgery preconditions shared by every mutation.
  fn guard(&mut self) -> Option<Blocked> {
    if !self.session.is_authenticated() {
      self.session.toaster().error(messages::LOGIN_TO_ADD);
      let location = login_location(self.session.path());
      self.view.navigate(&location);
      return Some(Blocked::NotAuthenticated);
    }
    if self.session.client().csrf().is_none() {
      error!("anti-forgery token not found, refusing to send cart mutation");
      self.session.toaster().error(messages::SESSION_ERROR);
      return Some(Blocked::MissingToken);
    }
    None
  }

  fn debounced(&mut self, id: &ProductId, control: Control) -> bool {
    !self.session.debouncer_mut().try_acquire(id, control)
  }

  /// Checks a quantity control click passes before anything is sent. A
  /// blocked click never opens a debounce window.
  fn admit(&mut self, id: &ProductId, control: Control) -> Option<Dispatch> {
    if !self.view.controls_enabled(id) {
      debug!(product_id = %id, "item controls disabled, ignoring click");
      return Some(Dispatch::Blocked(Blocked::ControlsDisabled));
    }
    if let Some(blocked) = self.guard() {
      return Some(Dispatch::Blocked(blocked));
    }
    if self.debounced(id, control) {
      return Some(Dispatch::Debounced);
    }
    None
  }

  /// Add one unit from a card's "Add to Cart" control.
  ///
  /// On success the card switches to quantity controls. Any non-success
  /// reply other than a transport failure means the backend did not treat
  /// the session as logged in, so the page goes to the login page.
  pub async fn add(&mut self, id: &ProductId) -> Dispatch {
    if let Some(blocked) = self.guard() {
      return Dispatch::Blocked(blocked);
    }

    self.session.cart_mut().begin(id, Intent::Increment);
    let result = self.session.client().add_to_cart(id).await;
    let outcome = MutationOutcome::classify(result, Some(ADDED_REPLY));

    match &outcome {
      MutationOutcome::Confirmed(confirmation) => {
        let quantity = self.session.cart_mut().confirm_provisional(id);
        self
          .view
          .set_card_control(id, CardControl::Quantity { quantity });
        self.apply_cart_count(confirmation);
        self.session.toaster().success(messages::ADDED);
        info!(product_id = %id, quantity, "added to cart");
      }
      MutationOutcome::Rejected { .. } => {
        self.session.cart_mut().discard(id);
        let location = login_location(self.session.path());
        self.view.navigate(&location);
      }
      MutationOutcome::Transport { status, message } => {
        self.session.cart_mut().discard(id);
        let text = match (status, message) {
          (_, Some(message)) => message.clone(),
          (Some(_), None) => messages::ADD_FAILED.to_string(),
          (None, None) => messages::SOMETHING_WRONG.to_string(),
        };
        self.session.toaster().error(text);
      }
      MutationOutcome::AuthRedirect { location } => {
        self.session.cart_mut().discard(id);
        self.view.navigate(location);
      }
    }

    Dispatch::Sent(outcome)
  }

  /// `+` on a card's quantity controls. Same endpoint as [`add`](Self::add),
  /// but any reply without an `error` confirms.
  pub async fn increment(&mut self, id: &ProductId) -> Dispatch {
    if let Some(dispatch) = self.admit(id, Control::Increment) {
      return dispatch;
    }

    self.session.cart_mut().begin(id, Intent::Increment);
    let result = self.session.client().add_to_cart(id).await;
    let outcome = MutationOutcome::classify(result, None);

    match &outcome {
      MutationOutcome::Confirmed(confirmation) => {
        let quantity = self.session.cart_mut().confirm_provisional(id);
        self
          .view
          .set_card_control(id, CardControl::Quantity { quantity });
        self.apply_cart_count(confirmation);
        self.session.toaster().success(messages::INCREASED);
        debug!(product_id = %id, quantity, "quantity increased");
      }
      _ => self.fail_card_mutation(id, &outcome),
    }

    Dispatch::Sent(outcome)
  }

  /// `−` on a card's quantity controls. Dropping to zero swaps the controls
  /// back to a fresh "Add to Cart" control.
  pub async fn decrement(&mut self, id: &ProductId) -> Dispatch {
    if let Some(dispatch) = self.admit(id, Control::Decrement) {
      return dispatch;
    }

    self.session.cart_mut().begin(id, Intent::Decrement);
    let result = self.session.client().update_quantity(id, QuantityAction::Decrement).await;
    let outcome = MutationOutcome::classify(result, None);

    match &outcome {
      MutationOutcome::Confirmed(confirmation) => {
        if self.reconcile_update(id, confirmation).await > 0 {
          self.session.toaster().success(messages::DECREASED);
        }
      }
      _ => self.fail_card_mutation(id, &outcome),
    }

    Dispatch::Sent(outcome)
  }

  /// Cart page `+`/`−`. Subtotals come from the server, the page total is
  /// re-summed from the displayed rows, and emptying the cart reloads the
  /// cart page after a short delay.
  pub async fn update_quantity(&mut self, id: &ProductId, action: QuantityAction) -> Dispatch {
    let control = match action {
      QuantityAction::Increment => Control::Increment,
      QuantityAction::Decrement => Control::Decrement,
    };
    if let Some(dispatch) = self.admit(id, control) {
      return dispatch;
    }

    let intent = match action {
      QuantityAction::Increment => Intent::Increment,
      QuantityAction::Decrement => Intent::Decrement,
    };
    self.session.cart_mut().begin(id, intent);
    let result = self.session.client().update_quantity(id, action).await;
    let outcome = MutationOutcome::classify(result, Some(UPDATED_REPLY));

    match &outcome {
      MutationOutcome::Confirmed(confirmation) => {
        self.reconcile_update(id, confirmation).await;
      }
      MutationOutcome::Rejected { message } => {
        self.session.cart_mut().discard(id);
        let text = match message {
          Some(message) => format!("{}: {}", messages::CART_UPDATE_FAILED, message),
          None => format!("{}.", messages::CART_UPDATE_FAILED),
        };
        self.session.toaster().error(text);
        self.view.disable_item_controls(id);
      }
      MutationOutcome::Transport { status, .. } => {
        self.session.cart_mut().discard(id);
        let text = if status.is_some() {
          messages::SERVER_UNREACHABLE
        } else {
          messages::UNEXPECTED
        };
        self.session.toaster().error(text);
      }
      MutationOutcome::AuthRedirect { location } => {
        self.session.cart_mut().discard(id);
        self.view.navigate(location);
      }
    }

    Dispatch::Sent(outcome)
  }

  /// Failure handling shared by the card quantity controls.
  fn fail_card_mutation(&mut self, id: &ProductId, outcome: &MutationOutcome) {
    self.session.cart_mut().discard(id);
    match outcome {
      MutationOutcome::Rejected { message } => {
        self
          .session
          .toaster()
          .error(message.clone().unwrap_or_else(|| messages::UPDATE_FAILED.to_string()));
        self.view.disable_item_controls(id);
      }
      MutationOutcome::Transport { message, .. } => {
        self
          .session
          .toaster()
          .error(message.clone().unwrap_or_else(|| messages::SOMETHING_WRONG.to_string()));
      }
      MutationOutcome::AuthRedirect { location } => self.view.navigate(location),
      MutationOutcome::Confirmed(_) => {}
    }
  }

  fn apply_cart_count(&mut self, confirmation: &Confirmation) {
    match confirmation.cart_count {
      Some(count) => self.session.set_badge(&mut *self.view, count),
      None => warn!("reply carried no cart_count, badge left unchanged"),
    }
  }

  /// Apply a confirmed `/cart/update/` reply to state and page. Returns the
  /// confirmed quantity.
  async fn reconcile_update(&mut self, id: &ProductId, confirmation: &Confirmation) -> u32 {
    let quantity = match confirmation.quantity {
      Some(quantity) => {
        self.session.cart_mut().confirm(id, quantity);
        quantity
      }
      None => {
        debug!(product_id = %id, "update reply carried no quantity, keeping provisional value");
        self.session.cart_mut().confirm_provisional(id)
      }
    };

    let control = if quantity == 0 {
      CardControl::AddButton
    } else {
      CardControl::Quantity { quantity }
    };
    if self.view.card_control(id).is_some() {
      self.view.set_card_control(id, control);
    }

    if self.view.has_row(id) {
      if quantity == 0 {
        self.view.remove_row(id);
        debug!(product_id = %id, "removed cart item");
      } else {
        match confirmation.item_total {
          Some(item_total) => self.view.update_row(id, quantity, item_total),
          None => {
            error!(product_id = %id, "update reply carried no item_total");
            return quantity;
          }
        }
      }
    } else if self.view.is_cart_listing() {
      error!(product_id = %id, "cart item not found");
      return quantity;
    }

    self.apply_cart_count(confirmation);
    if self.view.is_cart_listing() {
      self.refresh_cart_listing().await;
    }

    debug!(product_id = %id, quantity, "quantity reconciled");
    quantity
  }

  async fn refresh_cart_listing(&mut self) {
    let total: Money = self.view.displayed_subtotals().into_iter().sum();
    self.view.set_cart_total(total);

    if self.view.row_count() == 0 {
      info!("cart is empty, reloading cart page");
      self.view.show_empty_cart();
      tokio::time::sleep(self.session.empty_cart_redirect()).await;
      self.view.navigate(CART_PATH);
    }
  }
}
