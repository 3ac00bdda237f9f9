//! Cart sync engine.
//!
//! Every cart mutation is a single round trip whose reply is the only source
//! of truth. Local quantities are tracked in two phases: a provisional value
//! recorded when the request is sent, replaced by the server's answer on
//! success and dropped on any failure. The page is patched only from
//! confirmed data.

mod debounce;
mod engine;
mod outcome;
mod state;

pub use debounce::{Control, Debouncer};
pub use engine::{Blocked, CartSync, Dispatch, messages};
pub use outcome::{Confirmation, MutationOutcome};
pub use state::{CartState, Intent, Provisional};
