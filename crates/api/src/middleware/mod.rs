//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the signed-in admin, from a Bearer token.

pub mod auth;
