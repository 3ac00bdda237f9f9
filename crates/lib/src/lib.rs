//! scoopjoy-lib: client-side cart synchronization for the ScoopJoy storefront
//!
//! This crate provides the headless client layer that sits in front of the
//! storefront backend:
//! - `cookie`: anti-forgery token extraction from the session cookie header
//! - `api`: typed HTTP contracts for cart, catalog, auth and address endpoints
//! - `sync`: the cart sync engine reconciling local state with server truth
//! - `view`: the page model the engine patches after every response
//! - `session`: the per-page context that ties the pieces together

pub mod api;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod cookie;
pub mod mirror;
pub mod money;
pub mod pages;
pub mod paths;
pub mod renderer;
pub mod session;
pub mod sync;
pub mod toast;
pub mod view;
