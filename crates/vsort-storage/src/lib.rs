//! S3-compatible object store client.
//!
//! This crate provides:
//! - Whole-object byte upload/download (overwrite semantics)
//! - Prefix listing with pagination
//! - Bucket connectivity checks

pub mod client;
pub mod error;

pub use client::{BlobClient, ObjectInfo, StoreConfig};
pub use error::{StorageError, StorageResult};
