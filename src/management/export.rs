use std::path::{Path, PathBuf};

use crate::{
    error::ExportError,
    types::{EnrichedTrack, ExportDocument},
};

/// Persists the accumulated export document at checkpoints.
///
/// Every write replaces the whole file with the full processed prefix, so
/// an interrupted run leaves the last checkpoint on disk as valid JSON.
pub struct ExportWriter {
    path: PathBuf,
    playlist: String,
    checkpoint_every: usize,
    writes: usize,
}

impl ExportWriter {
    pub fn new(path: PathBuf, playlist: String, checkpoint_every: usize) -> Self {
        Self {
            path,
            playlist,
            checkpoint_every: checkpoint_every.max(1),
            writes: 0,
        }
    }

    /// Whether the run should checkpoint after `processed` of `total` items.
    pub fn is_due(&self, processed: usize, total: usize) -> bool {
        processed == total || processed % self.checkpoint_every == 0
    }

    /// Writes `tracks` if a checkpoint is due. Returns whether it wrote.
    pub async fn checkpoint(
        &mut self,
        tracks: &[EnrichedTrack],
        total: usize,
    ) -> Result<bool, ExportError> {
        if !self.is_due(tracks.len(), total) {
            return Ok(false);
        }

        self.persist(tracks).await?;
        Ok(true)
    }

    /// Unconditionally overwrites the export file with `tracks`.
    pub async fn persist(&mut self, tracks: &[EnrichedTrack]) -> Result<(), ExportError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let document = ExportDocument {
            playlist: self.playlist.clone(),
            tracks: tracks.to_vec(),
        };
        let json = serde_json::to_string_pretty(&document)?;

        // write next to the target and rename, so readers never see half a file
        let tmp = self.tmp_path();
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;

        self.writes += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
