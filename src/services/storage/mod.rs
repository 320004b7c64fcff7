//! Artifact persistence keyed by job id.
//!
//! Handlers only see the `ArtifactStore` trait (save / locate), so the local
//! filesystem backend can be replaced without touching them.
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

pub mod job_id;
pub mod local;

pub use job_id::JobId;
pub use local::LocalArtifactStore;

/// File extension of stored artifacts (binary glTF).
pub const ARTIFACT_EXTENSION: &str = "glb";

/// Media type served for stored artifacts.
pub const ARTIFACT_CONTENT_TYPE: &str = "model/gltf-binary";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("artifact store i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Where an artifact lives once saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    path: PathBuf,
}

impl ArtifactLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist `bytes` for `job_id`, replacing any previous artifact.
    async fn save(&self, job_id: &JobId, bytes: &[u8]) -> Result<ArtifactLocation, StoreError>;

    /// `Ok(None)` when nothing has been saved for `job_id`.
    async fn locate(&self, job_id: &JobId) -> Result<Option<ArtifactLocation>, StoreError>;
}
