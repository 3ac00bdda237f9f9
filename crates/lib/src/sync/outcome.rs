use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{ApiError, CartMutationReply, Reply};
use crate::money::Money;

/// Server-confirmed effect of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
  /// New quantity of the item; `0` means it was removed. Absent on `add`.
  pub quantity: Option<u32>,
  pub item_total: Option<Money>,
  pub cart_count: Option<u32>,
}

/// Every way a cart mutation round trip can end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MutationOutcome {
  /// 2xx with the expected `message` and no `error`.
  Confirmed(Confirmation),
  /// The backend answered but refused: an `error` field, or a 2xx body
  /// without the expected `message`.
  Rejected { message: Option<String> },
  /// The request failed in flight or came back with a non-2xx status.
  Transport { status: Option<u16>, message: Option<String> },
  /// The backend redirected: the session is no longer authenticated.
  AuthRedirect { location: String },
}

impl MutationOutcome {
  /// Classify a raw reply. `expected` is the success `message` the caller
  /// insists on (`"Added"` or `"Updated"`); with `None` any 2xx body without
  /// an `error` confirms.
  ///
  /// An `error` field wins over everything else in a 2xx body.
  pub fn classify(result: Result<Reply<CartMutationReply>, ApiError>, expected: Option<&str>) -> Self {
    match result {
      Ok(Reply::Body(reply)) => {
        if let Some(error) = reply.error {
          warn!(error = %error, "cart mutation rejected");
          return MutationOutcome::Rejected { message: Some(error) };
        }
        if let Some(expected) = expected
          && reply.message.as_deref() != Some(expected)
        {
          warn!(message = ?reply.message, expected, "unexpected cart mutation reply");
          return MutationOutcome::Rejected { message: None };
        }
        debug!(quantity = ?reply.quantity, cart_count = ?reply.cart_count, "cart mutation confirmed");
        MutationOutcome::Confirmed(Confirmation {
          quantity: reply.quantity,
          item_total: reply.item_total,
          cart_count: reply.cart_count,
        })
      }
      Ok(Reply::Redirect { location }) | Err(ApiError::Redirected { location }) => {
        MutationOutcome::AuthRedirect { location }
      }
      Ok(Reply::Status { code, message }) => MutationOutcome::Transport {
        status: Some(code),
        message,
      },
      Err(ApiError::Status { status, message, .. }) => MutationOutcome::Transport {
        status: Some(status),
        message,
      },
      Err(err) => {
        warn!(error = %err, "cart mutation failed");
        MutationOutcome::Transport {
          status: None,
          message: None,
        }
      }
    }
  }

  pub fn is_confirmed(&self) -> bool {
    matches!(self, MutationOutcome::Confirmed(_))
  }
}
