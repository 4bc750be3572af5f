//! Settings model for helm-v2-cleanup.
//!
//! This module defines the Settings struct describing where the Helm v2
//! installation lives: Tiller namespace, release storage, cluster connection
//! and the local home folder. It supports forward-compatible YAML parsing
//! (unknown fields are ignored), defaults matching a stock `helm init`, and
//! validation of settings values.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Settings;
pub use operations::SettingsOverrides;
pub use types::{StorageType, TILLER_SELECTOR};
