//! Tests for settings functionality.

use crate::config::types::{DEFAULT_RELEASE_LABEL, DEFAULT_TILLER_NAMESPACE};
use crate::config::{Settings, SettingsOverrides, StorageType, TILLER_SELECTOR};
use crate::error::CleanupError;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.tiller_namespace, DEFAULT_TILLER_NAMESPACE);
    assert_eq!(settings.label, DEFAULT_RELEASE_LABEL);
    assert_eq!(settings.release_storage, StorageType::Configmaps);
    assert_eq!(settings.tiller_selector, TILLER_SELECTOR);
    assert!(!settings.tiller_out_cluster);
    assert!(settings.kube_context.is_none());
    assert!(settings.kubeconfig.is_none());
    assert!(settings.helm_v2_home.is_none());
    assert!(settings.validate().is_ok());
}

#[test]
fn test_parse_minimal_yaml() {
    let settings = Settings::from_yaml("").unwrap();

    assert_eq!(settings.tiller_namespace, "kube-system");
    assert_eq!(settings.release_storage, StorageType::Configmaps);
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
tiller_namespace: tiller-world
release_storage: secrets
"#;
    let settings = Settings::from_yaml(yaml).unwrap();

    assert_eq!(settings.tiller_namespace, "tiller-world");
    assert_eq!(settings.release_storage, StorageType::Secrets);
    assert_eq!(settings.label, "OWNER=TILLER");
}

#[test]
fn test_parse_yaml_ignores_unknown_fields() {
    let yaml = r#"
kube_context: staging
future_option: true
"#;
    let settings = Settings::from_yaml(yaml).unwrap();

    assert_eq!(settings.kube_context.as_deref(), Some("staging"));
    assert!(settings.extra.contains_key("future_option"));
}

#[test]
fn test_parse_invalid_storage_fails() {
    let result = Settings::from_yaml("release_storage: etcd\n");
    assert!(matches!(result, Err(CleanupError::UserError(_))));
}

#[test]
fn test_validate_rejects_empty_namespace() {
    let settings = Settings {
        tiller_namespace: "  ".to_string(),
        ..Settings::default()
    };
    let err = settings.validate().unwrap_err();
    assert!(err.to_string().contains("tiller_namespace"));
}

#[test]
fn test_validate_rejects_malformed_label() {
    for label in ["", "OWNER", "OWNER=", "=TILLER", "OWNER=TILLER,NAME"] {
        let settings = Settings {
            label: label.to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err(), "label {:?} should be rejected", label);
    }
}

#[test]
fn test_validate_accepts_multi_pair_label() {
    let settings = Settings {
        label: "OWNER=TILLER,team=platform".to_string(),
        ..Settings::default()
    };
    assert!(settings.validate().is_ok());
}

#[test]
fn test_parse_custom_tiller_selector() {
    let settings = Settings::from_yaml("tiller_selector: app=tiller,team=platform\n").unwrap();
    assert_eq!(settings.tiller_selector, "app=tiller,team=platform");
}

#[test]
fn test_validate_rejects_malformed_tiller_selector() {
    for selector in ["", "app", "app=helm,"] {
        let settings = Settings {
            tiller_selector: selector.to_string(),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("tiller_selector"), "selector {:?}", selector);
    }
}

#[test]
fn test_overrides_replace_file_values() {
    let base = Settings::from_yaml("tiller_namespace: from-file\nkube_context: file-ctx\n").unwrap();
    let overrides = SettingsOverrides {
        tiller_namespace: Some("from-flag".to_string()),
        release_storage: Some("Secrets".to_string()),
        tiller_out_cluster: true,
        ..SettingsOverrides::default()
    };

    let settings = base.with_overrides(overrides).unwrap();

    assert_eq!(settings.tiller_namespace, "from-flag");
    assert_eq!(settings.release_storage, StorageType::Secrets);
    assert!(settings.tiller_out_cluster);
    // Untouched values survive
    assert_eq!(settings.kube_context.as_deref(), Some("file-ctx"));
}

#[test]
fn test_overrides_reject_unknown_storage() {
    let overrides = SettingsOverrides {
        release_storage: Some("memory".to_string()),
        ..SettingsOverrides::default()
    };
    let err = Settings::default().with_overrides(overrides).unwrap_err();
    assert!(err.to_string().contains("unsupported release storage 'memory'"));
}

#[test]
fn test_resolve_reads_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.yaml");
    std::fs::write(
        &path,
        "tiller_namespace: legacy\nhelm_v2_home: /opt/helm2\ntiller_out_cluster: true\n",
    )
    .unwrap();

    let settings = Settings::resolve(Some(&path), SettingsOverrides::default()).unwrap();

    assert_eq!(settings.tiller_namespace, "legacy");
    assert_eq!(settings.helm_v2_home, Some(PathBuf::from("/opt/helm2")));
    assert!(settings.tiller_out_cluster);
}

#[test]
fn test_resolve_missing_settings_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.yaml");

    let err = Settings::resolve(Some(&path), SettingsOverrides::default()).unwrap_err();
    assert!(err.to_string().contains("failed to read settings file"));
}

#[test]
fn test_resolve_validates_overrides() {
    let overrides = SettingsOverrides {
        label: Some("not-a-selector".to_string()),
        ..SettingsOverrides::default()
    };
    assert!(Settings::resolve(None, overrides).is_err());
}

#[test]
fn test_storage_type_from_str() {
    assert_eq!(StorageType::from_str("configmaps"), Some(StorageType::Configmaps));
    assert_eq!(StorageType::from_str("secret"), Some(StorageType::Secrets));
    assert_eq!(StorageType::from_str("sql"), None);
    assert_eq!(StorageType::Secrets.to_string(), "secrets");
}
