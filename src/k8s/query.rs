/// Cluster query operations the exporters depend on
use anyhow::Result;

/// Read-only view of a cluster, returning raw kubectl-style text
///
/// Exporters only ever talk to the cluster through this trait, so the same
/// selection and layout logic runs against kubectl or an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait ClusterQuery {
    /// Names of every namespace in the cluster
    async fn list_namespaces(&self) -> Result<Vec<String>>;

    /// JSON listing (`{"items": [...]}`) of `kind` in `namespace`
    async fn list_objects_json(&self, kind: &str, namespace: &str) -> Result<String>;

    /// YAML listing of `kind` in `namespace`
    async fn list_objects_yaml(&self, kind: &str, namespace: &str) -> Result<String>;

    /// Canonical YAML of a single namespaced object
    async fn get_object_yaml(&self, kind: &str, name: &str, namespace: &str) -> Result<String>;

    /// Names of every PersistentVolume
    async fn list_pv_names(&self) -> Result<Vec<String>>;

    /// Canonical YAML of a single PersistentVolume
    async fn get_pv_yaml(&self, name: &str) -> Result<String>;
}
