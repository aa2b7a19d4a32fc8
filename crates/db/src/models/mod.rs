//! Row types and DTOs, one module per backend table.
//!
//! Field names follow the backend's column names; text columns default to
//! empty strings because the tables allow nulls there.

pub mod about;
pub mod client;
pub mod contact;
pub mod hero;
pub mod message;
pub mod project;
