//! Database models shared across the order intake repository.

pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod draft;
pub mod profile;
