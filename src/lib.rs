//! An unofficial interface to the Courier delivery platform's admin API.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod endpoints;
mod gate;
mod id;
mod session;
mod view;

pub use gate::{AuthGate, GateState, LoginAttempt, LoginError, RouteDecision};
pub use id::Id;
pub use session::{AdminUser, Session, SessionStore};
pub use view::{FetchTicket, ViewState};

/// The default user agent to use when communicating with the Courier server.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
