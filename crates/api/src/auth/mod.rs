//! Authentication primitives.
//!
//! - [`jwt`] -- validation of the managed backend's access tokens.

pub mod jwt;
