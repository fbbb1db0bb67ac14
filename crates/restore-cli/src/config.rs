//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use restore_compiler::CompileOptions;
use restore_domains::DomainsConfig;
use serde::{Deserialize, Serialize};

/// Relative location of the project config file.
pub const CONFIG_PATH: &str = ".restore/config.yaml";

/// Template written by `restore init`.
pub const DEFAULT_CONFIG: &str = r#"# Restoration compiler configuration

compile:
  shadow_prefix: initial_
  # auto | manual | both
  restoration: auto
  # max_instances: 100000

domains:
  museum:
    rows: 3
    cols: 3
    entrance: t00
    diamond: t21
    trace_tiles:
      - t10
"#;

/// Main configuration, loaded from .restore/config.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreConfig {
    /// Compiler options
    #[serde(default)]
    pub compile: CompileOptions,

    /// Parameters of the configurable bundled domains
    #[serde(default)]
    pub domains: DomainsConfig,
}

impl RestoreConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from project root (looks for .restore/config.yaml)
    pub fn load_from_project(project_root: &Path) -> Result<Self> {
        let config_path = config_path(project_root);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// An explicit path wins over the project config.
    pub fn resolve(explicit: Option<&Path>, project_root: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Self::load_from_project(project_root),
        }
    }
}

pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use restore_compiler::RestorationStrategy;

    #[test]
    fn test_template_matches_defaults() {
        let config: RestoreConfig = serde_yaml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, RestoreConfig::default());
    }

    #[test]
    fn test_missing_project_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RestoreConfig::load_from_project(dir.path()).unwrap();
        assert_eq!(config.compile.shadow_prefix, "initial_");
        assert_eq!(config.domains.museum.rows, 3);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".restore")).unwrap();
        std::fs::write(
            config_path(dir.path()),
            "compile:\n  restoration: both\n  max_instances: 500\ndomains:\n  museum:\n    rows: 5\n",
        )
        .unwrap();

        let config = RestoreConfig::load_from_project(dir.path()).unwrap();
        assert_eq!(config.compile.restoration, RestorationStrategy::Both);
        assert_eq!(config.compile.max_instances, Some(500));
        assert_eq!(config.compile.shadow_prefix, "initial_");
        assert_eq!(config.domains.museum.rows, 5);
        assert_eq!(config.domains.museum.cols, 3);
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("custom.yaml");
        std::fs::write(&explicit, "compile:\n  shadow_prefix: snap_\n").unwrap();

        let config = RestoreConfig::resolve(Some(&explicit), dir.path()).unwrap();
        assert_eq!(config.compile.shadow_prefix, "snap_");
    }

    #[test]
    fn test_malformed_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "compile: [not, a, map]\n").unwrap();

        let err = RestoreConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
