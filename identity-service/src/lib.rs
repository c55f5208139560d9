//! Identity service domain library.
//!
//! Owns the sign-up, login, refresh, and logout flows over an external
//! user store, delegating hashing and token work to the `auth` crate.
//! Transport and persistence adapters live outside this crate and talk to
//! it through the ports in [`domain::auth::ports`].

pub mod config;
pub mod domain;

pub use domain::auth;
