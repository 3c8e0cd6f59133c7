//! reportgen-storage
//!
//! Blob store adapter. The `BlobStore` trait is what the pipeline sees;
//! `S3BlobStore` is a thin wrapper around the AWS S3 SDK and
//! `MemoryBlobStore` keeps everything in process.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;

pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;
pub use store::{AccessLink, BlobStore, Presence, PutOutcome};
