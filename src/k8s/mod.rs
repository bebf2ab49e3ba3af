/// Kubernetes cluster access
pub mod client;
pub mod listing;
pub mod namespaces;
pub mod query;

pub use client::KubernetesClient;
pub use namespaces::NamespaceSelector;
pub use query::ClusterQuery;
