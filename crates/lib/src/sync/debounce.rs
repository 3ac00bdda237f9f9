use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::catalog::ProductId;

/// A quantity control on a card or cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
  Increment,
  Decrement,
}

/// Per-control click debouncing.
///
/// The first click opens a window; further clicks on the same control
/// inside the window are dropped, not deferred.
#[derive(Debug)]
pub struct Debouncer {
  window: Duration,
  accepted: HashMap<(ProductId, Control), Instant>,
}

impl Debouncer {
  pub fn new(window: Duration) -> Self {
    Self {
      window,
      accepted: HashMap::new(),
    }
  }

  /// Returns `true` if the click should go through.
  pub fn try_acquire(&mut self, id: &ProductId, control: Control) -> bool {
    let now = Instant::now();
    let key = (id.clone(), control);

    if let Some(last) = self.accepted.get(&key)
      && now.duration_since(*last) < self.window
    {
      debug!(product_id = %id, control = ?control, "click dropped by debounce");
      return false;
    }

    self.accepted.insert(key, now);
    self.accepted.retain(|_, at| now.duration_since(*at) < self.window);
    true
  }
}
