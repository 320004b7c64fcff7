use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{ARTIFACT_EXTENSION, ArtifactLocation, ArtifactStore, JobId, StoreError};

/// Flat directory of `{job_id}.glb` files. File existence is the only state.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    /// Open the store, creating `root` (and parents) if missing.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| StoreError::io(&root, e))?;

        tracing::debug!(root = %root.display(), "artifact store ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artifact_path(&self, job_id: &JobId) -> PathBuf {
        self.root.join(format!("{job_id}.{ARTIFACT_EXTENSION}"))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn save(&self, job_id: &JobId, bytes: &[u8]) -> Result<ArtifactLocation, StoreError> {
        let path = self.artifact_path(job_id);
        // Write next to the target then rename, so readers never observe a partial file.
        let tmp = self
            .root
            .join(format!(".{job_id}.{}.tmp", uuid::Uuid::new_v4().simple()));

        if let Err(e) = fs::write(&tmp, bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::io(&tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::io(&path, e));
        }

        tracing::debug!(job_id = %job_id, bytes = bytes.len(), "artifact saved");
        Ok(ArtifactLocation::new(path))
    }

    async fn locate(&self, job_id: &JobId) -> Result<Option<ArtifactLocation>, StoreError> {
        let path = self.artifact_path(job_id);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(ArtifactLocation::new(path))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;

    async fn store() -> (TempDir, LocalArtifactStore) {
        let dir = TempDir::new().unwrap();
        let store = LocalArtifactStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn open_creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("models");

        let store = LocalArtifactStore::open(&root).await.unwrap();

        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[tokio::test]
    async fn locate_after_save_returns_saved_bytes() {
        let (_dir, store) = store().await;
        let job_id = JobId::new();

        let saved = store.save(&job_id, b"GLBDATA").await.unwrap();
        let found = store.locate(&job_id).await.unwrap().expect("artifact");

        assert_eq!(saved, found);
        assert_eq!(fs::read(found.path()).await.unwrap(), b"GLBDATA");
        assert_eq!(
            found.path().file_name().unwrap().to_str().unwrap(),
            format!("{job_id}.glb")
        );
    }

    #[tokio::test]
    async fn locate_unknown_id_is_none() {
        let (_dir, store) = store().await;
        assert!(store.locate(&JobId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_existing_artifact() {
        let (_dir, store) = store().await;
        let job_id = JobId::new();

        store.save(&job_id, b"first").await.unwrap();
        let location = store.save(&job_id, b"second").await.unwrap();

        assert_eq!(fs::read(location.path()).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn save_leaves_no_temporary_files() {
        let (dir, store) = store().await;
        let job_id = JobId::new();
        store.save(&job_id, b"payload").await.unwrap();

        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        assert_eq!(names, vec![format!("{job_id}.glb")]);
    }

    #[tokio::test]
    async fn concurrent_saves_do_not_cross_write() {
        let (_dir, store) = store().await;
        let store = Arc::new(store);

        let handles: Vec<_> = (0..16u8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let job_id = JobId::new();
                    store.save(&job_id, &[i; 64]).await.unwrap();
                    (job_id, i)
                })
            })
            .collect();

        for handle in handles {
            let (job_id, i) = handle.await.unwrap();
            let location = store.locate(&job_id).await.unwrap().unwrap();
            assert_eq!(fs::read(location.path()).await.unwrap(), vec![i; 64]);
        }
    }

    #[tokio::test]
    async fn save_into_missing_root_reports_io_error() {
        let dir = TempDir::new().unwrap();
        let store = LocalArtifactStore::open(dir.path().join("gone")).await.unwrap();
        fs::remove_dir(store.root()).await.unwrap();

        let err = store.save(&JobId::new(), b"x").await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
