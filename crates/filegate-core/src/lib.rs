//! Filegate Core Library
//!
//! This crate provides the domain models, permission model, error types,
//! hook interfaces, and configuration shared across all filegate components.

pub mod access;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;

// Re-export commonly used types
pub use config::GatewayConfig;
pub use error::{ErrorMetadata, GatewayError, GatewayResult, LogLevel};
pub use hooks::{
    AssetTransformHook, DirectoryNameResolver, HookRegistry, PathResolverHook, PreDeleteHook,
};
pub use models::{AssetRecord, PermissionTemplate, RequestContext, ResponseShape, UploaderConfig};
