//! Filegate Storage Library
//!
//! Filesystem side of the gateway: the storage root, upload directory
//! resolution, finalization renames, streaming reads, and deletion. All
//! relative paths are validated against traversal out of the root.

pub mod dirs;
pub mod files;
pub mod root;

pub use dirs::{resolve_upload_dir, ResolvedDir};
pub use files::{
    discard_temp_file, finalize_upload, open_asset_stream, remove_asset_file, AssetByteStream,
};
pub use root::StorageRoot;
