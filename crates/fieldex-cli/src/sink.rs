//! Local promotion destination writing one JSON document per batch.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use fieldex_core::{Destination, PromotionBatch, PromotionError, PromotionSink};
use fieldex_core::collab::PromotionReceipt;

pub struct JsonDirSink {
    dir: PathBuf,
    pretty: bool,
}

impl JsonDirSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            pretty: true,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// File path for a batch; the doc id is reduced to file-safe characters.
    fn path_for(&self, batch: &PromotionBatch) -> PathBuf {
        let name: String = batch
            .doc_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl PromotionSink for JsonDirSink {
    fn destination(&self) -> Destination {
        Destination::LocalFile
    }

    fn promote(&self, batch: &PromotionBatch) -> Result<PromotionReceipt, PromotionError> {
        if self.dir.as_os_str().is_empty() {
            return Err(PromotionError::NotConfigured(Destination::LocalFile));
        }

        fs::create_dir_all(&self.dir)?;

        let content = if self.pretty {
            serde_json::to_string_pretty(batch)?
        } else {
            serde_json::to_string(batch)?
        };

        let path = self.path_for(batch);
        fs::write(&path, content)?;
        debug!("Promoted {} fields to {}", batch.fields.len(), path.display());

        Ok(PromotionReceipt {
            destination: Destination::LocalFile,
            location: Some(path.display().to_string()),
            records: batch.fields.len(),
        })
    }
}
