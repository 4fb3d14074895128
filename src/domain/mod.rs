//! Domain aggregates exposed by the order intake service layer.

pub mod auth;
pub mod client;
pub mod draft;
pub mod order;
pub mod profile;
pub mod types;
