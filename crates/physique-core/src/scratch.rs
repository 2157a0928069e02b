//! Scratch directory for in-flight uploads
//!
//! Every upload is staged under a server-generated key
//! (`<uuid>.upload`), so client-supplied names never reach the filesystem and
//! concurrent requests never share a path. A [`StagedFile`] removes its entry
//! when dropped, which covers error and cancellation paths; the success path
//! calls [`StagedFile::discard`] to remove it asynchronously and observe the
//! result.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{ScratchError, ScratchResult};

/// File extension of staged entries
pub const STAGED_EXTENSION: &str = "upload";

/// Directory used to stage uploads for the duration of a request
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// Open the scratch directory, creating it (and its parents) if absent
    pub fn open(root: impl Into<PathBuf>) -> ScratchResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| ScratchError::Directory {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Path of the scratch directory
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create a new, empty staged file under a fresh key
    pub async fn stage(&self) -> ScratchResult<StagedFile> {
        let id = Uuid::new_v4();
        let path = self.root.join(format!("{}.{}", id, STAGED_EXTENSION));

        // create_new: a key collision must fail rather than truncate
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        tracing::debug!(staged_id = %id, path = %path.display(), "Staged file created");

        Ok(StagedFile {
            id,
            path,
            file: Some(file),
            size: 0,
            removed: false,
        })
    }

    /// Remove staged entries left behind by a previous process
    ///
    /// Only regular files named `<uuid>.upload` are removed. Returns the
    /// number of entries removed.
    pub async fn purge_stale(&self) -> ScratchResult<usize> {
        let mut entries =
            tokio::fs::read_dir(&self.root)
                .await
                .map_err(|source| ScratchError::Directory {
                    path: self.root.clone(),
                    source,
                })?;

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_staged_name(&path) || !entry.file_type().await?.is_file() {
                continue;
            }

            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "Purged stale staged file");
                    removed += 1;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(removed)
    }
}

/// Whether `path` has the shape of a staged entry
fn is_staged_name(path: &Path) -> bool {
    if path.extension() != Some(OsStr::new(STAGED_EXTENSION)) {
        return false;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| Uuid::parse_str(stem).is_ok())
}

/// One upload staged in the scratch directory
///
/// The entry is removed on drop unless [`discard`](Self::discard) already
/// removed it.
#[derive(Debug)]
pub struct StagedFile {
    id: Uuid,
    path: PathBuf,
    file: Option<tokio::fs::File>,
    size: u64,
    removed: bool,
}

impl StagedFile {
    /// Server-generated key of this entry
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Path of the staged entry
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written so far
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Append a chunk of the upload
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> ScratchResult<()> {
        let file = self.file.as_mut().ok_or(ScratchError::Finished(self.id))?;
        file.write_all(chunk).await?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    /// Flush and sync the staged bytes, then close the write handle
    pub async fn finish(&mut self) -> ScratchResult<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }
        Ok(())
    }

    /// Remove the staged entry
    ///
    /// An entry that is already gone counts as removed.
    pub async fn discard(mut self) -> ScratchResult<()> {
        self.file.take();
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.removed = true;
        tracing::debug!(staged_id = %self.id, size = self.size, "Staged file discarded");
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        self.file.take();
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(staged_id = %self.id, "Staged file removed on drop");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    staged_id = %self.id,
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove staged file"
                );
            }
        }
    }
}
