/// Command execution helpers for external cluster tools
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished command
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl CommandOutput {
    fn from_output(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }

    /// Return stdout if the command succeeded, otherwise an error with stderr
    pub fn into_result(self) -> Result<String> {
        if self.success {
            Ok(self.stdout)
        } else {
            anyhow::bail!("{}", self.stderr.trim())
        }
    }
}

/// Builder for one external command invocation
pub struct CommandBuilder {
    command: Command,
    display: String,
    context_msg: Option<String>,
}

impl CommandBuilder {
    /// Create a new command builder with piped stdout/stderr
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        let display = program.as_ref().to_string_lossy().to_string();
        let mut command = Command::new(program);
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
        Self {
            command,
            display,
            context_msg: None,
        }
    }

    /// Add a single argument
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.display.push(' ');
        self.display.push_str(&arg.as_ref().to_string_lossy());
        self.command.arg(arg);
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Set an environment variable
    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.command.env(key, val);
        self
    }

    /// Set KUBECONFIG environment variable
    pub fn kubeconfig(self, path: &Path) -> Self {
        self.env("KUBECONFIG", path)
    }

    /// Set context message used when the command cannot be spawned
    pub fn context<S: Into<String>>(mut self, msg: S) -> Self {
        self.context_msg = Some(msg.into());
        self
    }

    /// Execute and return raw output
    pub async fn output(mut self) -> Result<CommandOutput> {
        debug!("Running: {}", self.display);

        let output = match &self.context_msg {
            Some(ctx) => self.command.output().await.context(ctx.clone())?,
            None => self
                .command
                .output()
                .await
                .with_context(|| format!("Failed to execute `{}`", self.display))?,
        };
        Ok(CommandOutput::from_output(output))
    }

    /// Execute and return stdout on success, error on failure
    pub async fn run(self) -> Result<String> {
        self.output().await?.into_result()
    }
}

/// Check if a command-line tool is installed
pub async fn check_tool_installed(
    tool_name: &str,
    version_args: &[&str],
    install_url: &str,
) -> Result<()> {
    let output = CommandBuilder::new(tool_name)
        .args(version_args)
        .output()
        .await;

    match output {
        Ok(out) if out.success => Ok(()),
        _ => anyhow::bail!(
            "{} is not installed or not in PATH. Please install from {}",
            tool_name,
            install_url
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_returns_stdout() {
        let stdout = CommandBuilder::new("echo")
            .arg("kind: ConfigMap")
            .context("Testing echo command")
            .run()
            .await
            .unwrap();

        assert_eq!(stdout.trim(), "kind: ConfigMap");
    }

    #[tokio::test]
    async fn test_run_failure_carries_stderr() {
        let result = CommandBuilder::new("sh")
            .args(["-c", "echo 'namespaces is forbidden' >&2; exit 1"])
            .run()
            .await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("namespaces is forbidden"));
    }

    #[tokio::test]
    async fn test_kubeconfig_sets_env() {
        let stdout = CommandBuilder::new("sh")
            .args(["-c", "echo $KUBECONFIG"])
            .kubeconfig(Path::new("/tmp/admin.conf"))
            .run()
            .await
            .unwrap();

        assert!(stdout.contains("/tmp/admin.conf"));
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let result = CommandBuilder::new("kube-export-definitely-missing-binary")
            .output()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_check_tool_installed_missing() {
        let result =
            check_tool_installed("kube-export-definitely-missing-binary", &["version"], "https://example.invalid")
                .await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("not installed"));
    }
}
