//! Port definitions (traits) for external dependencies
//!
//! The naming core never touches I/O. Catalogs supply resource requests and
//! sinks receive the resolved plans; adapters implement both.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::{ResourcePlan, ResourceRequest};

/// Error type for resource sinks
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Port receiving each resolved resource plan
#[async_trait]
pub trait ResourceSink: Send + Sync {
    /// Record a plan (name + tags) for one resource
    async fn record(&self, plan: &ResourcePlan) -> Result<(), SinkError>;

    /// Short sink name for logs (e.g., "memory", "manifest")
    fn name(&self) -> &'static str;
}

/// Error type for resource catalogs
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },
    #[error("Invalid engine '{engine}' for resource '{name}': must match [a-z0-9_]+")]
    InvalidEngine { name: String, engine: String },
    #[error("No resources found in {0}")]
    Empty(String),
}

/// Port for loading the resources a deployment declares
#[async_trait]
pub trait ResourceCatalog: Send + Sync {
    async fn load(&self) -> Result<Vec<ResourceRequest>, CatalogError>;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
