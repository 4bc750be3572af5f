//! Removal of the local Helm v2 home folder.

use super::ConfigRemover;
use crate::error::{CleanupError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the Helm v2 home folder.
///
/// Order: explicit setting, `HELM_V2_HOME`, `HELM_HOME`, then `~/.helm`.
pub fn resolve_home_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    for var in ["HELM_V2_HOME", "HELM_HOME"] {
        if let Some(value) = env::var_os(var).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(value));
        }
    }

    dirs::home_dir()
        .map(|home| home.join(".helm"))
        .ok_or_else(|| {
            CleanupError::UserError(
                "cannot locate the Helm v2 home folder: set HELM_V2_HOME or --helm-v2-home"
                    .to_string(),
            )
        })
}

/// Removes the Helm v2 home folder from disk.
///
/// The folder is located when the removal runs, so a missing home directory
/// only matters to invocations that clean configuration.
#[derive(Debug, Clone, Default)]
pub struct HomeFolderRemover {
    explicit: Option<PathBuf>,
}

impl HomeFolderRemover {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

/// Refuse folders whose removal would take far more than Helm v2 state with it.
fn ensure_removable(path: &Path) -> Result<()> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    if canonical.parent().is_none() {
        return Err(CleanupError::DeletionError(format!(
            "refusing to remove filesystem root as Helm v2 home: {}",
            path.display()
        )));
    }

    if let Some(user_home) = dirs::home_dir() {
        let user_home = user_home.canonicalize().unwrap_or(user_home);
        if canonical == user_home {
            return Err(CleanupError::DeletionError(format!(
                "refusing to remove the user home directory as Helm v2 home: {}",
                path.display()
            )));
        }
    }

    Ok(())
}

impl ConfigRemover for HomeFolderRemover {
    fn remove_config_root(&self, dry_run: bool) -> Result<()> {
        let home = resolve_home_dir(self.explicit.as_deref())?;
        ensure_removable(&home)?;

        tracing::info!("[Helm 2] Home folder \"{}\" will be deleted.", home.display());

        if dry_run {
            return Ok(());
        }

        if !home.exists() {
            tracing::warn!(
                "[Helm 2] Home folder \"{}\" does not exist, nothing to delete.",
                home.display()
            );
            return Ok(());
        }

        fs::remove_dir_all(&home).map_err(|e| {
            CleanupError::DeletionError(format!(
                "failed to delete Helm v2 home folder \"{}\": {}",
                home.display(),
                e
            ))
        })?;

        tracing::info!("[Helm 2] Home folder \"{}\" deleted.", home.display());
        Ok(())
    }
}
