//! Filesystem-based resource catalog
//!
//! Reads a TOML file with one `[[resources]]` table per requested resource:
//!
//! ```toml
//! [[resources]]
//! kind = "s3_bucket"
//! name = "raw data"
//!
//! [[resources]]
//! kind = "dms_endpoint"
//! name = "orders"
//! endpoint = { engine = "oracle", direction = "source" }
//! ```

use async_trait::async_trait;
use infra_namer_domain::{CatalogError, ResourceCatalog, ResourceRequest};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    resources: Vec<ResourceRequest>,
}

/// TOML resource catalog
pub struct FsResourceCatalog {
    path: PathBuf,
}

impl FsResourceCatalog {
    /// Create a catalog backed by an existing file
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(CatalogError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Resource catalog not found: {}", path.display()),
            )));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Engines are checked at load time, ahead of planning
    fn validate(&self, request: &ResourceRequest) -> Result<(), CatalogError> {
        if let Some(endpoint) = &request.endpoint {
            if !endpoint.has_valid_engine() {
                return Err(CatalogError::InvalidEngine {
                    name: request.name.clone(),
                    engine: endpoint.engine.clone(),
                });
            }
        }
        Ok(())
    }

    fn parse(&self, content: &str) -> Result<Vec<ResourceRequest>, CatalogError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::Parse {
            file: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        for request in &file.resources {
            self.validate(request)?;
        }

        if file.resources.is_empty() {
            return Err(CatalogError::Empty(self.path.display().to_string()));
        }

        Ok(file.resources)
    }
}

#[async_trait]
impl ResourceCatalog for FsResourceCatalog {
    async fn load(&self) -> Result<Vec<ResourceRequest>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let requests = self.parse(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            count = requests.len(),
            "Loaded resource catalog"
        );
        Ok(requests)
    }
}
