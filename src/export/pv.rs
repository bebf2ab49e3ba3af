/// PersistentVolume export
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use super::writer::FileWriter;
use super::{ExportError, ExportReport};
use crate::k8s::ClusterQuery;

/// Exports every PersistentVolume to `<dir>/<name>.yaml`
pub struct PvExporter<'a, Q> {
    query: &'a Q,
    export_path: PathBuf,
}

impl<'a, Q: ClusterQuery> PvExporter<'a, Q> {
    pub fn new(query: &'a Q, export_path: impl Into<PathBuf>) -> Self {
        Self {
            query,
            export_path: export_path.into(),
        }
    }

    pub async fn export(&self) -> Result<ExportReport> {
        FileWriter::ensure_dir(&self.export_path).await?;

        let names: Vec<String> = self
            .query
            .list_pv_names()
            .await
            .context("Failed to get PersistentVolume names")?
            .into_iter()
            .filter(|name| !name.trim().is_empty())
            .collect();

        info!(
            "Exporting {} PersistentVolume(s) to {}",
            names.len(),
            self.export_path.display()
        );

        let mut report = ExportReport::default();
        for name in &names {
            let yaml = match self.query.get_pv_yaml(name).await {
                Ok(yaml) => yaml,
                Err(e) => {
                    report.record_failure(ExportError::query(format!("PV {}", name), &e));
                    continue;
                }
            };

            match FileWriter::write_yaml(&self.export_path, name, &yaml).await {
                Ok(path) => {
                    info!("Exported PV {} to {}", name, path.display());
                    report.written.push(path);
                }
                Err(e) => report.record_failure(e),
            }
        }

        Ok(report)
    }
}
