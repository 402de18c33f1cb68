//! infra-namer adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `catalog`: TOML resource catalog loader
//! - `sink`: in-memory and JSON-lines manifest sinks

mod catalog_fs;
pub mod manifest;
mod sink_memory;

/// Re-exports for catalog adapters
pub mod catalog {
    pub use crate::catalog_fs::FsResourceCatalog;
}

/// Re-exports for sink adapters
pub mod sink {
    pub use crate::manifest::{ManifestSink, ManifestWriter};
    pub use crate::sink_memory::InMemoryResourceSink;
}
