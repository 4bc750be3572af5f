//! kubectl command runner for helm-v2-cleanup.
//!
//! Provides a wrapper around `kubectl` with captured stdout/stderr and the
//! cluster connection (context and kubeconfig) applied to every call. All
//! cluster operations go through this module.

use crate::config::Settings;
use std::path::PathBuf;
use std::process::{Command, Output};
use thiserror::Error;

/// Default kubectl executable, resolved through `PATH`.
pub const DEFAULT_KUBECTL: &str = "kubectl";

/// Failure to run kubectl or a non-zero exit from it.
///
/// Callers wrap this into the error category of the phase they serve.
#[derive(Error, Debug)]
pub enum KubectlError {
    #[error("failed to execute kubectl {verb}: {source}")]
    Spawn {
        verb: String,
        source: std::io::Error,
    },

    #[error("kubectl {verb} failed (exit code {code}): {message}")]
    Failed {
        verb: String,
        code: i32,
        message: String,
    },
}

/// Result of a successful kubectl command execution.
#[derive(Debug, Clone)]
pub struct KubectlOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl KubectlOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Cluster connection used by every kubectl call.
#[derive(Debug, Clone)]
pub struct Kubectl {
    program: PathBuf,
    context: Option<String>,
    kubeconfig: Option<PathBuf>,
}

impl Kubectl {
    /// Connection described by the resolved settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            program: PathBuf::from(DEFAULT_KUBECTL),
            context: settings.kube_context.clone(),
            kubeconfig: settings.kubeconfig.clone(),
        }
    }

    /// Use a different kubectl executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Global flags selecting the cluster, placed before the command arguments.
    fn connection_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(context) = &self.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }
        if let Some(kubeconfig) = &self.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(kubeconfig.display().to_string());
        }
        args
    }

    /// Run a kubectl command against the configured cluster.
    ///
    /// # Returns
    ///
    /// * `Ok(KubectlOutput)` - On successful execution (exit code 0)
    /// * `Err(KubectlError)` - If kubectl could not be started or exited non-zero
    pub fn run(&self, args: &[&str]) -> Result<KubectlOutput, KubectlError> {
        let verb = args.first().unwrap_or(&"").to_string();

        tracing::debug!(program = %self.program.display(), ?args, "running kubectl");

        let output = Command::new(&self.program)
            .args(self.connection_args())
            .args(args)
            .output()
            .map_err(|source| KubectlError::Spawn {
                verb: verb.clone(),
                source,
            })?;

        let kubectl_output = KubectlOutput::from_output(&output);

        if output.status.success() {
            Ok(kubectl_output)
        } else {
            let message = if kubectl_output.stderr.is_empty() {
                kubectl_output.stdout.clone()
            } else {
                kubectl_output.stderr.clone()
            };

            Err(KubectlError::Failed {
                verb,
                code: output.status.code().unwrap_or(-1),
                message,
            })
        }
    }
}
