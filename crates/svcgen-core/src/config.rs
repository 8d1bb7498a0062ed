use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Generator configuration loaded from `.svcgen.yaml` and merged over the
/// defaults field by field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Source document location: an http(s) URL or a local path. Required;
    /// there is no usable default.
    pub doc_url: String,
    /// Prefix stripped from every path before naming and type derivation.
    pub base_url: String,
    /// Directory holding the render templates. Absent means the embedded
    /// templates are used.
    pub template_dir: Option<String>,
    /// Directory for generated files, created if absent.
    pub output_dir: String,
    pub services_file_name: String,
    pub types_file_name: String,
    /// When non-empty, only these document paths are generated.
    pub include_paths: Vec<String>,
    /// Document paths never generated; wins over `include_paths`.
    pub exclude_paths: Vec<String>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            doc_url: String::new(),
            base_url: "/api".to_string(),
            template_dir: None,
            output_dir: "src/api".to_string(),
            services_file_name: "services.ts".to_string(),
            types_file_name: "services.types.ts".to_string(),
            include_paths: Vec::new(),
            exclude_paths: Vec::new(),
        }
    }
}

impl GenConfig {
    /// Check the invariants that must hold before any I/O starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.doc_url.is_empty() {
            return Err(ConfigError::MissingDocUrl);
        }
        Ok(())
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".svcgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: GenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# svcgen configuration
doc_url: ""                         # OpenAPI v3 JSON document (http(s) URL or local path), required
base_url: /api                      # prefix stripped from every route before naming
output_dir: src/api
services_file_name: services.ts
types_file_name: services.types.ts

# template_dir: ./templates         # override the built-in render templates

include_paths: []                   # when non-empty, only these document paths
exclude_paths: []                   # never these document paths (wins over include)
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GenConfig::default();
        assert!(config.doc_url.is_empty());
        assert_eq!(config.base_url, "/api");
        assert_eq!(config.output_dir, "src/api");
        assert_eq!(config.services_file_name, "services.ts");
        assert_eq!(config.types_file_name, "services.types.ts");
        assert!(config.template_dir.is_none());
        assert!(config.include_paths.is_empty());
        assert!(config.exclude_paths.is_empty());
    }

    #[test]
    fn test_missing_doc_url_rejected() {
        let config = GenConfig::default();
        assert!(matches!(
            config.validate(),
            Err(crate::error::ConfigError::MissingDocUrl)
        ));
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
doc_url: https://api.example.com/openapi.json
base_url: /v1
output_dir: out
template_dir: ./tpl
include_paths:
  - /v1/widgets
exclude_paths:
  - /v1/internal
"#;
        let config: GenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.doc_url, "https://api.example.com/openapi.json");
        assert_eq!(config.base_url, "/v1");
        assert_eq!(config.output_dir, "out");
        assert_eq!(config.template_dir.as_deref(), Some("./tpl"));
        assert_eq!(config.include_paths, vec!["/v1/widgets"]);
        assert_eq!(config.exclude_paths, vec!["/v1/internal"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "doc_url: ./openapi.json\n";
        let config: GenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.doc_url, "./openapi.json");
        // Defaults applied
        assert_eq!(config.base_url, "/api");
        assert_eq!(config.services_file_name, "services.ts");
    }
}
