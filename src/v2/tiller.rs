//! Removal of the in-cluster Tiller deployment.

use super::ControllerRemover;
use crate::error::{CleanupError, Result};
use crate::kube::Kubectl;

/// Kinds `helm init` creates for Tiller.
const TILLER_KINDS: &str = "deployment,service";

/// Tiller remover reached through `kubectl`.
#[derive(Debug, Clone)]
pub struct KubectlControllerRemover {
    kubectl: Kubectl,
}

impl KubectlControllerRemover {
    pub fn new(kubectl: Kubectl) -> Self {
        Self { kubectl }
    }
}

impl ControllerRemover for KubectlControllerRemover {
    fn remove_controller(&self, namespace: &str, selector: &str, dry_run: bool) -> Result<()> {
        if dry_run {
            tracing::info!(
                "[Helm 2] Tiller {} matching \"{}\" in \"{}\" namespace would be deleted.",
                TILLER_KINDS,
                selector,
                namespace
            );
            return Ok(());
        }

        let output = self
            .kubectl
            .run(&[
                "delete",
                TILLER_KINDS,
                "--namespace",
                namespace,
                "--selector",
                selector,
            ])
            .map_err(|e| {
                CleanupError::DeletionError(format!(
                    "failed to remove Tiller from \"{}\" namespace: {}",
                    namespace, e
                ))
            })?;

        for line in output.stdout.lines() {
            tracing::debug!("{}", line);
        }

        Ok(())
    }
}
