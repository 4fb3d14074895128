//! Data transfer objects shaped for the UI.

pub mod clients;
