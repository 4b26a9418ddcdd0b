use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
    error::{Result, ShardError},
    record::{Record, Tensor},
};

/// Default shard file extension.
pub const DEFAULT_EXTENSION: &str = "records";

/// Writes batches of (image, grid) tensor pairs to sequentially numbered
/// shard files.
///
/// Each shard is an append-once sequence of independent [`Record`]s and is
/// never modified after writing. The output directory is an external
/// prerequisite; it is checked, not created.
#[derive(Debug, Clone)]
pub struct ShardWriter {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl ShardWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path of the shard with the given index: `<prefix>_<index>.<ext>`.
    pub fn shard_path(&self, index: u64) -> PathBuf {
        self.dir
            .join(format!("{}_{}.{}", self.prefix, index, self.extension))
    }

    /// Serializes the paired tensors into shard `index`, one record per
    /// pair, in order.
    ///
    /// Length divergence between the two sequences is a precondition
    /// failure; nothing is written in that case. A failure part-way
    /// through a batch removes the partial shard before propagating.
    pub fn write_shard(&self, images: &[Tensor], grids: &[Tensor], index: u64) -> Result<PathBuf> {
        if !self.dir.is_dir() {
            return Err(ShardError::DirectoryNotFound(self.dir.clone()));
        }
        if images.len() != grids.len() {
            return Err(ShardError::ShapeMismatch {
                images: images.len(),
                grids: grids.len(),
            });
        }

        let path = self.shard_path(index);
        info!(path = %path.display(), records = images.len(), "writing shard");

        match write_records(&path, images, grids) {
            Ok(()) => Ok(path),
            Err(err) => {
                warn!(path = %path.display(), "removing partial shard after write failure");
                let _ = fs::remove_file(&path);
                Err(err)
            }
        }
    }
}

fn write_records(path: &Path, images: &[Tensor], grids: &[Tensor]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for (image, grid) in images.iter().zip(grids) {
        let record = Record::from_pair(image, grid);
        bincode::serialize_into(&mut writer, &record)?;
    }
    writer.flush()?;
    Ok(())
}
