/// Directory creation and file output
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::ExportError;

/// Writes exported YAML under a root directory, overwriting silently
pub struct FileWriter;

impl FileWriter {
    /// Create `dir` and any missing parents
    pub async fn ensure_dir(dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create export directory {}", dir.display()))
    }

    /// Write `contents` to `dir/<stem>.yaml`
    pub async fn write_yaml(dir: &Path, stem: &str, contents: &str) -> Result<PathBuf, ExportError> {
        let path = dir.join(format!("{}.yaml", stem));
        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
