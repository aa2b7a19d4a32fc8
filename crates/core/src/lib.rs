//! Domain rules shared by the site API and the admin API.
//!
//! Nothing in here talks to the managed backend; these are the small pieces
//! of validation and formatting that every content screen repeats.

pub mod about;
pub mod contact;
pub mod error;
pub mod media;
pub mod message;
pub mod password;
pub mod search;
pub mod types;
