//! Configuration I/O (YAML loading)
//!
//! ```yaml
//! version: 1
//! analysis:
//!   conservative: false
//!   include_for_loops: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::analysis_config::PreallocConfig;
use super::error::{ConfigError, ConfigResult};

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Analysis switches; omitted fields keep their defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<PreallocConfig>,
}

impl PreallocConfig {
    /// Load a configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<PreallocConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<PreallocConfig> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        if !SUPPORTED_VERSIONS.contains(&file.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: file.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        Ok(file.analysis.unwrap_or_default())
    }

    /// Export as a v1 configuration file
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: 1,
            analysis: Some(*self),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = PreallocConfig::default().for_loops(true).conservative(false);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("include_for_loops: true"));

        let recovered = PreallocConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(recovered, config);
    }

    #[test]
    fn test_yaml_loading_partial_override() {
        let yaml_content = r#"
version: 1
analysis:
  include_for_loops: true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = PreallocConfig::from_yaml(temp_file.path()).unwrap();
        assert!(config.include_for_loops);
        assert!(config.include_range_loops);
        assert!(config.conservative);
    }

    #[test]
    fn test_yaml_version_only() {
        let config = PreallocConfig::from_yaml_str("version: 1\n").unwrap();
        assert_eq!(config, PreallocConfig::default());
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = PreallocConfig::from_yaml_str("analysis:\n  conservative: false\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = PreallocConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field() {
        let result = PreallocConfig::from_yaml_str("version: 1\nanalysis:\n  simple: true\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_both_loop_kinds_off() {
        let yaml = "version: 1\nanalysis:\n  include_range_loops: false\n";
        let config = PreallocConfig::from_yaml_str(yaml).unwrap();
        assert!(config.inspects_no_loops());
    }

    #[test]
    fn test_missing_file() {
        let result = PreallocConfig::from_yaml("/nonexistent/prealloc.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
