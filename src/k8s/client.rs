/// kubectl-backed cluster client
use anyhow::{Context, Result};
use std::path::PathBuf;

use super::query::ClusterQuery;
use crate::utils::command::CommandBuilder;

/// jsonpath template printing one `.metadata.name` per line
const NAME_PER_LINE: &str = "jsonpath={range .items[*]}{.metadata.name}{\"\\n\"}{end}";

/// Kubernetes client for kubectl operations
#[derive(Debug, Clone)]
pub struct KubernetesClient {
    kubeconfig: Option<PathBuf>,
    context: Option<String>,
}

impl KubernetesClient {
    /// Create a client using the ambient kubeconfig, optionally overridden
    pub fn new(kubeconfig: Option<PathBuf>, context: Option<String>) -> Self {
        Self {
            kubeconfig,
            context,
        }
    }

    /// Check if kubectl is installed
    pub async fn check_kubectl_installed() -> Result<()> {
        crate::utils::command::check_tool_installed(
            "kubectl",
            &["version", "--client"],
            "https://kubernetes.io/docs/tasks/tools/",
        )
        .await
    }

    fn kubectl(&self) -> CommandBuilder {
        let mut cmd = CommandBuilder::new("kubectl");
        if let Some(path) = &self.kubeconfig {
            cmd = cmd.kubeconfig(path);
        }
        if let Some(context) = &self.context {
            cmd = cmd.args(["--context", context.as_str()]);
        }
        cmd
    }
}

impl ClusterQuery for KubernetesClient {
    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let stdout = self
            .kubectl()
            .args(["get", "namespaces", "-o", NAME_PER_LINE])
            .context("Failed to execute kubectl get namespaces")
            .run()
            .await
            .context("Failed to list namespaces")?;

        Ok(parse_name_lines(&stdout))
    }

    async fn list_objects_json(&self, kind: &str, namespace: &str) -> Result<String> {
        self.kubectl()
            .args(["-n", namespace, "get", kind, "-o", "json"])
            .run()
            .await
            .with_context(|| format!("Failed to list {} in namespace {}", kind, namespace))
    }

    async fn list_objects_yaml(&self, kind: &str, namespace: &str) -> Result<String> {
        self.kubectl()
            .args(["get", kind, "-n", namespace, "-o", "yaml"])
            .run()
            .await
            .with_context(|| format!("Failed to list {} in namespace {}", kind, namespace))
    }

    async fn get_object_yaml(&self, kind: &str, name: &str, namespace: &str) -> Result<String> {
        self.kubectl()
            .args(["get", kind, name, "-n", namespace, "-o", "yaml"])
            .run()
            .await
            .with_context(|| format!("Failed to get {} {} in namespace {}", kind, name, namespace))
    }

    async fn list_pv_names(&self) -> Result<Vec<String>> {
        let stdout = self
            .kubectl()
            .args(["get", "pv", "-o", NAME_PER_LINE])
            .run()
            .await
            .context("Failed to list PersistentVolumes")?;

        Ok(parse_name_lines(&stdout))
    }

    async fn get_pv_yaml(&self, name: &str) -> Result<String> {
        self.kubectl()
            .args(["get", "pv", name, "-o", "yaml"])
            .run()
            .await
            .with_context(|| format!("Failed to get PersistentVolume {}", name))
    }
}

/// Split a name-per-line listing, dropping blank lines and stray quotes
pub fn parse_name_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim().trim_matches('\'').trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
