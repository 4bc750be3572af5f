//! Settings types and defaults for helm-v2-cleanup.
//!
//! This module defines enums, constants, and default value functions
//! used by the Settings struct.

use serde::Deserialize;
use std::fmt;

/// Namespace Tiller is installed into when none is configured.
pub const DEFAULT_TILLER_NAMESPACE: &str = "kube-system";

/// Label carried by every release record Tiller writes.
pub const DEFAULT_RELEASE_LABEL: &str = "OWNER=TILLER";

/// Selector matching the Tiller deployment and service created by `helm init`.
pub const TILLER_SELECTOR: &str = "app=helm,name=tiller";

/// Kubernetes object kind Tiller used as its release storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Releases stored as ConfigMaps (Tiller default).
    #[default]
    Configmaps,
    /// Releases stored as Secrets.
    Secrets,
}

impl StorageType {
    /// Parse a storage type from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "configmaps" | "configmap" => Some(Self::Configmaps),
            "secrets" | "secret" => Some(Self::Secrets),
            _ => None,
        }
    }

    /// Resource name understood by `kubectl`.
    pub fn resource(&self) -> &'static str {
        match self {
            StorageType::Configmaps => "configmaps",
            StorageType::Secrets => "secrets",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

// Default value functions for serde
pub(crate) fn default_tiller_namespace() -> String {
    DEFAULT_TILLER_NAMESPACE.to_string()
}
pub(crate) fn default_label() -> String {
    DEFAULT_RELEASE_LABEL.to_string()
}
pub(crate) fn default_tiller_selector() -> String {
    TILLER_SELECTOR.to_string()
}
