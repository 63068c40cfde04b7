//! Stylelint subprocess adapter.
//!
//! Locates the stylelint binary on PATH, probes its version once, and runs
//! one fix pass per request over stdin/stdout. The synthesized config is
//! handed over as a temporary JSON file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::EngineConfig;
use crate::engine::{EngineOutcome, LintEngine};
use crate::error::{Result, StylefixError};

/// Exit statuses stylelint uses for completed runs: 0 means clean, 2 means
/// problems were reported. Anything else is a crashed or misconfigured run.
const EXIT_CLEAN: i32 = 0;
const EXIT_PROBLEMS: i32 = 2;

pub struct StylelintCli {
    program: PathBuf,
    version: String,
}

impl StylelintCli {
    /// Locate stylelint on PATH and probe its version.
    pub fn discover() -> Result<Self> {
        let program = which::which("stylelint").map_err(|_| StylefixError::EngineUnavailable)?;
        let version = probe_version(&program)?;
        tracing::info!("using stylelint {} at {}", version, program.display());
        Ok(Self { program, version })
    }
}

fn probe_version(program: &Path) -> Result<String> {
    let output = std::process::Command::new(program)
        .arg("--version")
        .output()?;

    if !output.status.success() {
        return Err(StylefixError::LintExecution {
            message: "stylelint --version failed".to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

impl LintEngine for StylelintCli {
    async fn lint(&self, code: &str, config: &EngineConfig) -> Result<EngineOutcome> {
        // Stylelint wants its config as a file; give it one that lives for
        // the duration of the run.
        let mut config_file = tempfile::Builder::new()
            .prefix("stylefix-config-")
            .suffix(".json")
            .tempfile()?;
        let config_json =
            serde_json::to_string(config).map_err(|e| StylefixError::LintExecution {
                message: format!("failed to serialize engine config: {}", e),
            })?;
        config_file.write_all(config_json.as_bytes())?;
        config_file.flush()?;

        let mut child = Command::new(&self.program)
            .arg("--stdin")
            .arg("--fix")
            .args(["--formatter", "json"])
            .arg("--config")
            .arg(config_file.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(code.as_bytes()).await?;
            // dropping the handle closes the pipe
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        match output.status.code() {
            Some(EXIT_CLEAN) | Some(EXIT_PROBLEMS) => {}
            code => {
                return Err(StylefixError::LintExecution {
                    message: format!("stylelint exited with {:?}: {}", code, stderr.trim()),
                });
            }
        }

        // With --stdin --fix the fixed source goes to stdout and the JSON
        // formatter output to stderr. Unparseable diagnostics extract to
        // zero warnings downstream.
        let diagnostics = serde_json::from_str(&stderr).unwrap_or(serde_json::Value::Null);

        Ok(EngineOutcome {
            fixed_code: stdout,
            diagnostics,
        })
    }

    fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_probes_version() {
        // Skip on machines without a stylelint install.
        if which::which("stylelint").is_err() {
            return;
        }

        let engine = StylelintCli::discover().unwrap();
        assert!(!engine.version().is_empty());
    }

    #[test]
    fn test_discover_fails_without_binary() {
        if which::which("stylelint").is_ok() {
            return;
        }

        assert!(matches!(
            StylelintCli::discover(),
            Err(StylefixError::EngineUnavailable)
        ));
    }
}
