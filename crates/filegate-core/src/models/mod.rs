//! Data models for the gateway
//!
//! This module contains the data structures shared across pipelines: asset
//! records, permission templates, caller context, and response shaping.

mod asset;
mod template;

// Re-export all models for convenient imports
pub use asset::*;
pub use template::*;
