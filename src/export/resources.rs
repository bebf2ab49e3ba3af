/// Namespaced resource export in either file layout
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::writer::FileWriter;
use super::{ExportError, ExportReport};
use crate::config::ExportModel;
use crate::k8s::listing::{parse_listing, ExportedItem};
use crate::k8s::ClusterQuery;

/// Exports configured kinds from selected namespaces
pub struct ResourceExporter<'a, Q> {
    query: &'a Q,
    export_path: PathBuf,
    model: ExportModel,
}

impl<'a, Q: ClusterQuery> ResourceExporter<'a, Q> {
    pub fn new(query: &'a Q, export_path: impl Into<PathBuf>, model: ExportModel) -> Self {
        Self {
            query,
            export_path: export_path.into(),
            model,
        }
    }

    /// Export every (namespace, kind) pair.
    ///
    /// Only failing to create the export root is fatal. Everything else is
    /// recorded in the report and the run moves on.
    pub async fn export(&self, kinds: &[String], namespaces: &[String]) -> Result<ExportReport> {
        FileWriter::ensure_dir(&self.export_path).await?;

        info!(
            "Exporting {} kind(s) from {} namespace(s) to {} ({})",
            kinds.len(),
            namespaces.len(),
            self.export_path.display(),
            self.model
        );

        let mut report = ExportReport::default();
        for namespace in namespaces {
            match self.model {
                ExportModel::PerObject => {
                    self.export_namespace_objects(namespace, kinds, &mut report)
                        .await
                }
                ExportModel::PerKindBatch => {
                    self.export_namespace_batches(namespace, kinds, &mut report)
                        .await
                }
            }
        }

        Ok(report)
    }

    async fn export_namespace_objects(
        &self,
        namespace: &str,
        kinds: &[String],
        report: &mut ExportReport,
    ) {
        let ns_dir = self.export_path.join(namespace);
        if let Err(source) = tokio::fs::create_dir_all(&ns_dir).await {
            report.record_failure(ExportError::Write {
                path: ns_dir,
                source,
            });
            return;
        }

        for kind in kinds {
            let listing = match self.query.list_objects_json(kind, namespace).await {
                Ok(listing) => listing,
                Err(e) => {
                    report.record_failure(ExportError::query(
                        format!("{} in namespace {}", kind, namespace),
                        &e,
                    ));
                    continue;
                }
            };

            let parsed = match parse_listing(listing.as_bytes()) {
                Ok(parsed) => parsed,
                Err(source) => {
                    report.record_failure(ExportError::Listing {
                        kind: kind.clone(),
                        namespace: namespace.to_string(),
                        source,
                    });
                    continue;
                }
            };

            if parsed.cluster_scoped > 0 {
                debug!(
                    "Skipping {} cluster-scoped object(s) listed for {} in {}",
                    parsed.cluster_scoped, kind, namespace
                );
            }
            report.cluster_scoped_skipped += parsed.cluster_scoped;

            for object in parsed.objects {
                let body = match self
                    .query
                    .get_object_yaml(&object.kind, &object.name, &object.namespace)
                    .await
                {
                    Ok(body) => body,
                    Err(e) => {
                        report.record_failure(ExportError::query(
                            format!(
                                "{} {} in namespace {}",
                                object.kind, object.name, object.namespace
                            ),
                            &e,
                        ));
                        continue;
                    }
                };

                let item = ExportedItem {
                    name: object.export_name(),
                    body,
                };
                self.write_item(&ns_dir, &item, report).await;
            }
        }
    }

    async fn export_namespace_batches(
        &self,
        namespace: &str,
        kinds: &[String],
        report: &mut ExportReport,
    ) {
        for kind in kinds {
            match self.query.list_objects_yaml(kind, namespace).await {
                Ok(listing) => {
                    let item = ExportedItem {
                        name: format!("{}-{}", namespace, kind),
                        body: listing,
                    };
                    self.write_item(&self.export_path, &item, report).await;
                }
                Err(e) => report.record_failure(ExportError::query(
                    format!("{} in namespace {}", kind, namespace),
                    &e,
                )),
            }
        }
    }

    async fn write_item(&self, dir: &Path, item: &ExportedItem, report: &mut ExportReport) {
        match FileWriter::write_yaml(dir, &item.name, &item.body).await {
            Ok(path) => {
                info!("Exported {}", path.display());
                report.written.push(path);
            }
            Err(e) => report.record_failure(e),
        }
    }
}
