//! Filegate Gateway Library
//!
//! The ingestion and retrieval pipelines: upload, download, remove,
//! upload-permission enumeration, and asset listing, wired over the storage
//! tree, the metadata store, and the hook registry.

mod download;
mod gateway;
mod list;
mod permissions;
mod remove;
pub mod types;
mod upload;

pub use gateway::Gateway;
pub use types::{
    AssetDownload, AssetListing, FetchRequest, ListRequest, RemoveRequest, UploadRequest,
    UploadScope, UploadedFile,
};
