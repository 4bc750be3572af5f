//! Settings loading, layering, and validation.

use super::model::Settings;
use super::types::StorageType;
use crate::error::{CleanupError, Result};
use std::path::{Path, PathBuf};

/// Values supplied on the command line or through the environment.
///
/// `None` leaves the value from the settings file (or the default) in place.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub tiller_namespace: Option<String>,
    pub label: Option<String>,
    pub release_storage: Option<String>,
    pub tiller_out_cluster: bool,
    pub kube_context: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub helm_v2_home: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Successfully loaded and validated settings
    /// * `Err(CleanupError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CleanupError::UserError(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)
            .map_err(|e| CleanupError::UserError(format!("failed to parse settings YAML: {}", e)))?;

        for key in settings.extra.keys() {
            tracing::warn!("Ignoring unknown settings field '{}'.", key);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Build the effective settings: defaults, then the optional settings
    /// file, then command-line and environment overrides.
    pub fn resolve(file: Option<&Path>, overrides: SettingsOverrides) -> Result<Self> {
        let settings = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        let settings = settings.with_overrides(overrides)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides on top of these settings.
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Result<Self> {
        if let Some(namespace) = overrides.tiller_namespace {
            self.tiller_namespace = namespace;
        }
        if let Some(label) = overrides.label {
            self.label = label;
        }
        if let Some(storage) = overrides.release_storage {
            self.release_storage = StorageType::from_str(&storage.to_lowercase()).ok_or_else(|| {
                CleanupError::UserError(format!(
                    "unsupported release storage '{}': expected 'configmaps' or 'secrets'",
                    storage
                ))
            })?;
        }
        // A flag can only switch out-of-cluster mode on.
        if overrides.tiller_out_cluster {
            self.tiller_out_cluster = true;
        }
        if overrides.kube_context.is_some() {
            self.kube_context = overrides.kube_context;
        }
        if overrides.kubeconfig.is_some() {
            self.kubeconfig = overrides.kubeconfig;
        }
        if overrides.helm_v2_home.is_some() {
            self.helm_v2_home = overrides.helm_v2_home;
        }
        Ok(self)
    }

    /// Validate settings values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `tiller_namespace` must be non-empty
    /// - `label` and `tiller_selector` must be non-empty lists of `key=value` pairs
    pub fn validate(&self) -> Result<()> {
        if self.tiller_namespace.trim().is_empty() {
            return Err(CleanupError::UserError(
                "settings validation failed: tiller_namespace must not be empty".to_string(),
            ));
        }

        validate_selector("label", &self.label)?;
        validate_selector("tiller_selector", &self.tiller_selector)?;

        Ok(())
    }
}

fn validate_selector(field: &str, selector: &str) -> Result<()> {
    if selector.trim().is_empty() {
        return Err(CleanupError::UserError(format!(
            "settings validation failed: {} must not be empty",
            field
        )));
    }

    for pair in selector.split(',') {
        let valid = match pair.split_once('=') {
            Some((key, value)) => !key.trim().is_empty() && !value.trim().is_empty(),
            None => false,
        };
        if !valid {
            return Err(CleanupError::UserError(format!(
                "settings validation failed: {} '{}' must be a comma separated list of key=value pairs",
                field, selector
            )));
        }
    }

    Ok(())
}
