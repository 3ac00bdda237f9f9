//! Transient, self-dismissing user notifications.
//!
//! `Toaster::show` never blocks: the toast is pushed onto a shared stack and
//! a background timer removes it once its lifetime has elapsed. Toasts stack
//! freely; identical messages are not merged.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
  Error,
  Success,
}

impl fmt::Display for ToastKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToastKind::Error => f.write_str("error"),
      ToastKind::Success => f.write_str("success"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
  pub id: u64,
  pub message: String,
  pub kind: ToastKind,
}

#[derive(Debug, Clone)]
pub struct Toaster {
  active: Arc<Mutex<Vec<Toast>>>,
  next_id: Arc<AtomicU64>,
  lifetime: Duration,
}

impl Toaster {
  pub fn new(lifetime: Duration) -> Self {
    Self {
      active: Arc::new(Mutex::new(Vec::new())),
      next_id: Arc::new(AtomicU64::new(1)),
      lifetime,
    }
  }

  /// Display a toast and schedule its removal.
  ///
  /// Must be called from within a tokio runtime. Returns the toast id.
  pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
    let message = message.into();
    match kind {
      ToastKind::Error => warn!(message = %message, "toast"),
      ToastKind::Success => info!(message = %message, "toast"),
    }

    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
    lock(&self.active).push(Toast { id, message, kind });

    let active = Arc::clone(&self.active);
    let lifetime = self.lifetime;
    tokio::spawn(async move {
      tokio::time::sleep(lifetime).await;
      lock(&active).retain(|toast| toast.id != id);
    });

    id
  }

  pub fn error(&self, message: impl Into<String>) -> u64 {
    self.show(message, ToastKind::Error)
  }

  pub fn success(&self, message: impl Into<String>) -> u64 {
    self.show(message, ToastKind::Success)
  }

  /// Currently visible toasts, oldest first.
  pub fn active(&self) -> Vec<Toast> {
    lock(&self.active).clone()
  }

  /// Most recent visible toast.
  pub fn last(&self) -> Option<Toast> {
    lock(&self.active).last().cloned()
  }
}

// A poisoned toast list only means a timer task panicked mid-retain; the
// list itself is still usable.
fn lock(active: &Mutex<Vec<Toast>>) -> MutexGuard<'_, Vec<Toast>> {
  active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
