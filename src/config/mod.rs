/// Configuration management for kube-export
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_EXPORT_PATH: &str = "./k8s-export";

/// Main export configuration, loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Root directory for resource exports
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    /// Directory for PersistentVolume exports (defaults to `<exportPath>/pv`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pv_export_path: Option<PathBuf>,

    /// File layout: 1 = one file per object, 2 = one file per namespace and kind
    #[serde(default)]
    pub export_model: ExportModel,

    /// Namespaces to skip when no inclusion list is given
    #[serde(default)]
    pub excluded_namespaces: Vec<String>,

    /// Namespaces to export; when non-empty the exclusion list is ignored
    #[serde(default)]
    pub included_namespaces: Vec<String>,

    /// Resource kinds passed verbatim to kubectl (e.g. "deployment", "pvc,configmap")
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Export file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ExportModel {
    /// `<exportPath>/<namespace>/<kind>-<name>.yaml`, one file per object
    #[default]
    PerObject,
    /// `<exportPath>/<namespace>-<kind>.yaml`, the batch listing verbatim
    PerKindBatch,
}

impl TryFrom<u8> for ExportModel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::PerObject),
            2 => Ok(Self::PerKindBatch),
            other => Err(format!(
                "unsupported exportModel {}, expected 1 (per object) or 2 (per kind)",
                other
            )),
        }
    }
}

impl From<ExportModel> for u8 {
    fn from(model: ExportModel) -> Self {
        match model {
            ExportModel::PerObject => 1,
            ExportModel::PerKindBatch => 2,
        }
    }
}

impl fmt::Display for ExportModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerObject => write!(f, "per-object"),
            Self::PerKindBatch => write!(f, "per-kind batch"),
        }
    }
}

fn default_export_path() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_PATH)
}

impl ExportConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse, normalize and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let mut config: ExportConfig = serde_yaml::from_str(content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Treat empty paths as unset
    fn normalize(&mut self) {
        if self.export_path.as_os_str().is_empty() {
            self.export_path = default_export_path();
        }
        if self
            .pv_export_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.pv_export_path = None;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        Self::validate_names("includedNamespaces", &self.included_namespaces)?;
        Self::validate_names("excludedNamespaces", &self.excluded_namespaces)?;
        Self::validate_names("resources", &self.resources)?;
        Ok(())
    }

    fn validate_names(field: &str, names: &[String]) -> anyhow::Result<()> {
        if let Some(pos) = names.iter().position(|n| n.trim().is_empty()) {
            anyhow::bail!("{}[{}] cannot be empty", field, pos);
        }
        Ok(())
    }

    /// Directory PersistentVolumes are written to
    pub fn pv_export_path(&self) -> PathBuf {
        self.pv_export_path
            .clone()
            .unwrap_or_else(|| self.export_path.join("pv"))
    }

    /// Generate an example configuration file
    pub fn example() -> Self {
        Self {
            export_path: default_export_path(),
            pv_export_path: None,
            export_model: ExportModel::PerObject,
            excluded_namespaces: ["kube-system", "kube-public", "kube-node-lease"]
                .map(String::from)
                .to_vec(),
            included_namespaces: vec![],
            resources: [
                "pvc",
                "configmap",
                "service",
                "secret",
                "deployment",
                "statefulset",
                "job",
                "cronjob",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = ExportConfig::from_yaml("{}").unwrap();
        assert_eq!(config.export_path, PathBuf::from("./k8s-export"));
        assert_eq!(config.pv_export_path(), PathBuf::from("./k8s-export/pv"));
        assert_eq!(config.export_model, ExportModel::PerObject);
        assert!(config.resources.is_empty());
    }

    #[test]
    fn test_camel_case_keys() {
        let yaml = r#"
exportPath: /backup/cluster
pvExportPath: /backup/volumes
exportModel: 2
excludedNamespaces: [kube-system]
includedNamespaces: [default, apps]
resources: [deployment, "pvc,configmap"]
"#;
        let config = ExportConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.export_path, PathBuf::from("/backup/cluster"));
        assert_eq!(config.pv_export_path(), PathBuf::from("/backup/volumes"));
        assert_eq!(config.export_model, ExportModel::PerKindBatch);
        assert_eq!(config.excluded_namespaces, vec!["kube-system"]);
        assert_eq!(config.included_namespaces, vec!["default", "apps"]);
        assert_eq!(config.resources, vec!["deployment", "pvc,configmap"]);
    }

    #[test]
    fn test_empty_paths_fall_back_to_defaults() {
        let config = ExportConfig::from_yaml("exportPath: \"\"\npvExportPath: \"\"\n").unwrap();
        assert_eq!(config.export_path, PathBuf::from("./k8s-export"));
        assert_eq!(config.pv_export_path(), PathBuf::from("./k8s-export/pv"));
    }

    #[test]
    fn test_pv_path_follows_export_path() {
        let config = ExportConfig::from_yaml("exportPath: /data/out\n").unwrap();
        assert_eq!(config.pv_export_path(), PathBuf::from("/data/out/pv"));
    }

    #[test]
    fn test_unknown_export_model_rejected() {
        let err = ExportConfig::from_yaml("exportModel: 3\n").unwrap_err();
        assert!(err.to_string().contains("unsupported exportModel 3"));
    }

    #[test]
    fn test_blank_names_rejected() {
        let err = ExportConfig::from_yaml("resources: [deployment, \" \"]\n").unwrap_err();
        assert!(err.to_string().contains("resources[1]"));
    }

    #[test]
    fn test_example_roundtrips_through_yaml() {
        let yaml = serde_yaml::to_string(&ExportConfig::example()).unwrap();
        assert!(yaml.contains("exportModel: 1"));

        let config = ExportConfig::from_yaml(&yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.excluded_namespaces.len(), 3);
        assert!(config.resources.contains(&"statefulset".to_string()));
    }
}
