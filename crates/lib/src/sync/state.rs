use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::ProductId;
use crate::mirror::CartMirror;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
  Increment,
  Decrement,
}

/// A tentative quantity awaiting the server's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provisional {
  pub quantity: u32,
  pub intent: Intent,
}

/// Confirmed cart mirror plus in-flight provisional edits.
///
/// Confirmation overwrites both the provisional and the confirmed value with
/// server truth; discarding drops the provisional value and leaves the
/// confirmed one untouched.
#[derive(Debug, Clone, Default)]
pub struct CartState {
  confirmed: CartMirror,
  provisional: BTreeMap<ProductId, Provisional>,
}

impl CartState {
  pub fn new(confirmed: CartMirror) -> Self {
    Self {
      confirmed,
      provisional: BTreeMap::new(),
    }
  }

  pub fn mirror(&self) -> &CartMirror {
    &self.confirmed
  }

  /// Current best guess: the provisional value when one is pending.
  pub fn quantity(&self, id: &ProductId) -> u32 {
    self
      .provisional
      .get(id)
      .map(|p| p.quantity)
      .unwrap_or_else(|| self.confirmed.quantity(id))
  }

  pub fn pending(&self, id: &ProductId) -> Option<Provisional> {
    self.provisional.get(id).copied()
  }

  /// Record a tentative edit on top of the current best guess.
  pub fn begin(&mut self, id: &ProductId, intent: Intent) -> u32 {
    let current = self.quantity(id);
    let quantity = match intent {
      Intent::Increment => current.saturating_add(1),
      Intent::Decrement => current.saturating_sub(1),
    };
    self.provisional.insert(id.clone(), Provisional { quantity, intent });
    quantity
  }

  /// Replace local state with the server-reported quantity.
  pub fn confirm(&mut self, id: &ProductId, quantity: u32) {
    if let Some(provisional) = self.provisional.remove(id)
      && provisional.quantity != quantity
    {
      debug!(
        product_id = %id,
        intent = ?provisional.intent,
        provisional = provisional.quantity,
        confirmed = quantity,
        "server quantity differs from provisional"
      );
    }
    self.confirmed.set(id, quantity);
  }

  /// Promote the provisional value to confirmed, for endpoints that confirm
  /// success without reporting the new quantity. Returns the confirmed
  /// quantity.
  pub fn confirm_provisional(&mut self, id: &ProductId) -> u32 {
    if let Some(provisional) = self.provisional.remove(id) {
      self.confirmed.set(id, provisional.quantity);
    }
    self.confirmed.quantity(id)
  }

  pub fn discard(&mut self, id: &ProductId) {
    self.provisional.remove(id);
  }
}
