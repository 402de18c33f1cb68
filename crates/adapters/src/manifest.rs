//! JSON-lines manifest of planned resources.

use async_trait::async_trait;
use infra_namer_domain::model::{PlanAction, ResourcePlan, ResourceTags, ServiceKind};
use infra_namer_domain::ports::{Clock, ResourceSink, SinkError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Truncates the manifest on open; one run per file
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    path: PathBuf,
    file: Arc<Mutex<tokio::fs::File>>,
}

impl ManifestWriter {
    pub async fn new(path: PathBuf) -> Result<Self, ManifestError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, entry: &ManifestEntry<'_>) -> Result<(), ManifestError> {
        let line = serde_json::to_string(entry)?;
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    kind: ServiceKind,
    action: PlanAction,
    descriptive_name: &'a str,
    name: &'a str,
    service: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a ResourceTags>,
    #[serde(with = "time::serde::rfc3339")]
    planned_at: OffsetDateTime,
}

/// Sink writing each plan as one manifest line
#[derive(Clone)]
pub struct ManifestSink {
    writer: ManifestWriter,
    clock: Arc<dyn Clock>,
}

impl ManifestSink {
    pub fn new(writer: ManifestWriter, clock: Arc<dyn Clock>) -> Self {
        Self { writer, clock }
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }
}

#[async_trait]
impl ResourceSink for ManifestSink {
    async fn record(&self, plan: &ResourcePlan) -> Result<(), SinkError> {
        let entry = ManifestEntry {
            kind: plan.kind,
            action: plan.action,
            descriptive_name: &plan.descriptive_name,
            name: &plan.name,
            service: &plan.service_label,
            tags: plan.tags.as_ref(),
            planned_at: self.clock.now(),
        };

        self.writer.append(&entry).await.map_err(|error| match error {
            ManifestError::Io(e) => SinkError::Io(e),
            ManifestError::Serialize(e) => SinkError::Serialization(e.to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}
