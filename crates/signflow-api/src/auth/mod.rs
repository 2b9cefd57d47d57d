//! Caller credential extraction

pub mod bearer;

pub use bearer::{extract_bearer, BearerToken};
