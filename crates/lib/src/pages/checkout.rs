//! Checkout: address selection and order placement.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::api::{ApiError, Reply};
use crate::consts::{CART_PATH, CHECKOUT_PATH, LOGIN_PATH, ORDERS_PATH, PLACE_ORDER_PATH};
use crate::session::PageSession;
use crate::view::CartView;

pub const SELECT_ADDRESS: &str = "Please select a delivery address.";
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const SESSION_UNVERIFIED: &str = "Unable to verify session. Please try again.";
pub const CART_EMPTY: &str = "Your cart is empty. Please add items to proceed.";
pub const CART_UNVERIFIED: &str = "Unable to verify cart. Please try again.";
pub const ORDER_PLACED: &str = "Order placed successfully!";
pub const ORDER_FAILED: &str = "Failed to place order";
pub const ORDER_UNREACHABLE: &str = "Something went wrong. Please try again.";

/// The address chosen from the delivery modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedAddress {
  pub id: String,
  pub label: String,
  pub text: String,
}

impl SelectedAddress {
  /// Tiles without a name read as "home".
  pub fn new(id: impl Into<String>, label: Option<&str>, text: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      label: label.unwrap_or("home").to_string(),
      text: text.into(),
    }
  }
}

/// Where an order attempt stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OrderOutcome {
  NoAddress,
  SessionExpired,
  SessionUnverified,
  CartEmpty,
  CartUnverified,
  Placed { order_id: Option<u64> },
  Failed { message: String },
  Unreachable,
}

#[derive(Debug, Clone)]
pub struct Checkout {
  action_path: String,
  selected: Option<SelectedAddress>,
}

impl Default for Checkout {
  fn default() -> Self {
    Self::new(PLACE_ORDER_PATH)
  }
}

impl Checkout {
  /// `action_path` is the order form's action.
  pub fn new(action_path: impl Into<String>) -> Self {
    Self {
      action_path: action_path.into(),
      selected: None,
    }
  }

  pub fn select(&mut self, address: SelectedAddress) {
    info!(address_id = %address.id, "delivery address selected");
    self.selected = Some(address);
  }

  pub fn selected(&self) -> Option<&SelectedAddress> {
    self.selected.as_ref()
  }

  /// Verify the session and cart, then submit the order.
  ///
  /// Each check runs only after the previous one passed. Toasts and
  /// navigations go through the session and the view.
  pub async fn place_order<V: CartView>(&self, session: &PageSession, view: &mut V) -> OrderOutcome {
    let toaster = session.toaster();
    let client = session.client();
    let expired_location = format!("{}?next={}", LOGIN_PATH, CHECKOUT_PATH);

    let Some(address) = &self.selected else {
      toaster.error(SELECT_ADDRESS);
      return OrderOutcome::NoAddress;
    };

    match client.check_auth().await {
      Ok(true) => {}
      Ok(false) => {
        toaster.error(SESSION_EXPIRED);
        view.navigate(&expired_location);
        return OrderOutcome::SessionExpired;
      }
      Err(e) => {
        error!(error = %e, "error checking auth status");
        toaster.error(SESSION_UNVERIFIED);
        return OrderOutcome::SessionUnverified;
      }
    }

    match client.cart_items_strict().await {
      Ok(cart) if cart.is_empty() => {
        toaster.error(CART_EMPTY);
        view.navigate(CART_PATH);
        return OrderOutcome::CartEmpty;
      }
      Ok(cart) => info!(items = cart.len(), "cart verified before order"),
      Err(ApiError::Redirected { location }) => {
        warn!(location = %location, "cart request redirected");
        toaster.error(SESSION_EXPIRED);
        view.navigate(&expired_location);
        return OrderOutcome::SessionExpired;
      }
      Err(e) => {
        error!(error = %e, "error fetching cart state");
        toaster.error(CART_UNVERIFIED);
        return OrderOutcome::CartUnverified;
      }
    }

    match client.place_order(&self.action_path, &address.id).await {
      Ok(Reply::Body(reply)) => {
        info!(order_id = ?reply.order_id, "order placed");
        toaster.success(ORDER_PLACED);
        tokio::time::sleep(session.order_redirect()).await;
        view.navigate(ORDERS_PATH);
        OrderOutcome::Placed {
          order_id: reply.order_id,
        }
      }
      Ok(Reply::Status { code, message }) => {
        let message = message.unwrap_or_else(|| "Unknown error".to_string());
        error!(status = code, message = %message, "order failed");
        toaster.error(format!("{}: {}", ORDER_FAILED, message));
        OrderOutcome::Failed { message }
      }
      Ok(Reply::Redirect { location }) => {
        warn!(location = %location, "order submission redirected");
        toaster.error(SESSION_EXPIRED);
        view.navigate(&expired_location);
        OrderOutcome::SessionExpired
      }
      Err(e) => {
        error!(error = %e, "error during order submission");
        toaster.error(ORDER_UNREACHABLE);
        OrderOutcome::Unreachable
      }
    }
  }
}
