//! JSON API caller for the admin server.
//!
//! [`ApiClient::call`] forwards a request and hands back whatever JSON the
//! server answered with, whatever the status code. There is no retry, timeout
//! or auth handling; callers own those.
//!
//! [`AdminApi`] wraps the known admin routes on top of it.

pub mod admin;
pub mod client;
pub mod method;

pub use admin::*;
pub use client::*;
pub use method::*;
