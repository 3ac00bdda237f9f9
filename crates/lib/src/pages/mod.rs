//! Page controllers outside the cart flows.
//!
//! Each controller is page-scoped and talks to its own endpoints; none of
//! them shares state with the cart sync engine beyond the page session.

pub mod auth;
pub mod checkout;
pub mod profile;
pub mod quiz;
pub mod search;
