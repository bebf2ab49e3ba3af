/// kube-export - Kubernetes resource backup to YAML
///
/// Exports namespaced resources and PersistentVolumes from a cluster into a
/// tree of YAML files using kubectl.
mod config;
mod export;
mod k8s;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ExportConfig;
use crate::export::{PvExporter, ResourceExporter};
use crate::k8s::{ClusterQuery, KubernetesClient, NamespaceSelector};

#[derive(Parser)]
#[command(name = "kube-export")]
#[command(about = "Export Kubernetes resources to YAML files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Kubeconfig passed to kubectl (defaults to kubectl's own lookup)
    #[arg(long, env = "KUBECONFIG")]
    kubeconfig: Option<PathBuf>,

    /// kubectl context to use
    #[arg(long)]
    context: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export all configured resources from the selected namespaces
    All,

    /// Export PersistentVolumes only
    Pv,

    /// Generate example configuration file
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("kube_export={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Execute command
    let result = match cli.command {
        Commands::All => export_all(&cli).await,
        Commands::Pv => export_pv(&cli).await,
        Commands::Init => init_config(&cli).await,
    };

    if let Err(e) = result {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Load configuration and prepare a kubectl client
async fn prepare(cli: &Cli) -> Result<(ExportConfig, KubernetesClient)> {
    // Load configuration
    let config = ExportConfig::from_file(&cli.config).with_context(|| {
        format!("Failed to load configuration from {}", cli.config.display())
    })?;

    // Check prerequisites
    KubernetesClient::check_kubectl_installed()
        .await
        .context("kubectl is required")?;

    let client = KubernetesClient::new(cli.kubeconfig.clone(), cli.context.clone());
    Ok((config, client))
}

/// Export configured resources from every selected namespace
async fn export_all(cli: &Cli) -> Result<()> {
    let (config, client) = prepare(cli).await?;
    run_export_all(&config, &client).await
}

/// Export every PersistentVolume
async fn export_pv(cli: &Cli) -> Result<()> {
    let (config, client) = prepare(cli).await?;
    run_export_pv(&config, &client).await
}

async fn run_export_all<Q: ClusterQuery>(config: &ExportConfig, query: &Q) -> Result<()> {
    let live = query
        .list_namespaces()
        .await
        .context("Failed to get namespaces")?;
    let namespaces =
        NamespaceSelector::new(&config.included_namespaces, &config.excluded_namespaces)
            .select(&live);

    info!("Selected namespaces: {}", namespaces.join(", "));

    let exporter = ResourceExporter::new(query, &config.export_path, config.export_model);
    let report = exporter.export(&config.resources, &namespaces).await?;

    report.log_summary("resource");
    report.into_result()
}

async fn run_export_pv<Q: ClusterQuery>(config: &ExportConfig, query: &Q) -> Result<()> {
    let report = PvExporter::new(query, config.pv_export_path())
        .export()
        .await?;

    report.log_summary("PersistentVolume");
    report.into_result()
}

/// Initialize example configuration file
async fn init_config(cli: &Cli) -> Result<()> {
    if cli.config.exists() {
        anyhow::bail!(
            "Configuration file already exists: {}",
            cli.config.display()
        );
    }

    let yaml = serde_yaml::to_string(&ExportConfig::example())?;

    tokio::fs::write(&cli.config, yaml)
        .await
        .context("Failed to write configuration file")?;

    info!("Example configuration created: {}", cli.config.display());
    info!("");
    info!("Next steps:");
    info!("  1. Edit resources and namespace filters to match your cluster");
    info!("  2. Export resources:");
    info!("     kube-export all");
    info!("  3. Export PersistentVolumes:");
    info!("     kube-export pv");

    Ok(())
}
