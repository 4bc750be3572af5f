//! Settings struct definition and default implementation.

use super::types::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Connection and location settings shared by every cleanup phase.
///
/// Loaded from an optional YAML settings file, then overridden by
/// environment variables and command-line flags.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    // =========================================================================
    // Tiller settings
    // =========================================================================
    /// Namespace Tiller and its release records live in.
    #[serde(default = "default_tiller_namespace")]
    pub tiller_namespace: String,

    /// Label selector used to find Tiller release records.
    #[serde(default = "default_label")]
    pub label: String,

    /// Storage backend Tiller wrote releases to.
    #[serde(default)]
    pub release_storage: StorageType,

    /// Label selector matching the Tiller deployment and service.
    #[serde(default = "default_tiller_selector")]
    pub tiller_selector: String,

    /// Tiller ran outside the cluster ("Tillerless"); there is no deployment to remove.
    #[serde(default)]
    pub tiller_out_cluster: bool,

    // =========================================================================
    // Cluster connection
    // =========================================================================
    /// kubeconfig context to use instead of the current one.
    #[serde(default)]
    pub kube_context: Option<String>,

    /// kubeconfig file to use instead of the default one.
    #[serde(default)]
    pub kubeconfig: Option<PathBuf>,

    // =========================================================================
    // Local configuration
    // =========================================================================
    /// Helm v2 home folder. Resolved from the environment when unset.
    #[serde(default)]
    pub helm_v2_home: Option<PathBuf>,

    /// Unknown fields, reported as warnings when the file is loaded.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tiller_namespace: default_tiller_namespace(),
            label: default_label(),
            release_storage: StorageType::default(),
            tiller_selector: default_tiller_selector(),
            tiller_out_cluster: false,
            kube_context: None,
            kubeconfig: None,
            helm_v2_home: None,
            extra: BTreeMap::new(),
        }
    }
}
