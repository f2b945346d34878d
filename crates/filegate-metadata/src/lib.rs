//! Filegate Metadata Library
//!
//! This crate defines the metadata store and template catalog abstractions
//! the gateway is injected with, plus in-memory reference implementations.

pub mod catalog;
pub mod memory;
pub mod store;

// Re-export commonly used types
pub use catalog::TemplateCatalog;
pub use memory::{MemoryCatalog, MemoryStore};
pub use store::{AssetQuery, AssetStore, FindOptions, StoreError, StoreResult};
