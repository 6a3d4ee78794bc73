// Copyright 2025 Cowboy AI, LLC.

//! Format importers for webspace configuration files

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::webspace::WebspaceConfig;
use crate::errors::{EngineError, EngineResult};

/// Parses one configuration format into a [`WebspaceConfig`].
pub trait FormatImporter: Send + Sync {
    /// Format name used for lookups (`toml`, `json`)
    fn format(&self) -> &'static str;

    /// File extensions handled by this importer
    fn extensions(&self) -> &'static [&'static str];

    /// Parse the raw configuration text
    fn import(&self, input: &str) -> EngineResult<WebspaceConfig>;
}

/// TOML importer
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlImporter;

impl FormatImporter for TomlImporter {
    fn format(&self) -> &'static str {
        "toml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["toml"]
    }

    fn import(&self, input: &str) -> EngineResult<WebspaceConfig> {
        Ok(toml::from_str(input)?)
    }
}

/// JSON importer
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonImporter;

impl FormatImporter for JsonImporter {
    fn format(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn import(&self, input: &str) -> EngineResult<WebspaceConfig> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Registry of importers keyed by format name
#[derive(Clone)]
pub struct ImporterRegistry {
    importers: BTreeMap<&'static str, Arc<dyn FormatImporter>>,
}

impl Default for ImporterRegistry {
    fn default() -> Self {
        Self::new()
            .with_importer(Arc::new(TomlImporter))
            .with_importer(Arc::new(JsonImporter))
    }
}

impl ImporterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            importers: BTreeMap::new(),
        }
    }

    /// Register an importer, replacing one with the same format name
    pub fn with_importer(mut self, importer: Arc<dyn FormatImporter>) -> Self {
        self.importers.insert(importer.format(), importer);
        self
    }

    /// Registered format names
    pub fn formats(&self) -> Vec<String> {
        self.importers.keys().map(|name| name.to_string()).collect()
    }

    /// Importer by format name
    pub fn importer(&self, format: &str) -> EngineResult<&Arc<dyn FormatImporter>> {
        self.importers
            .get(format)
            .ok_or_else(|| EngineError::WebspaceFormatImporterNotFound {
                format: format.to_string(),
                available: self.formats(),
            })
    }

    /// Import and validate configuration text of the given format
    pub fn import(&self, format: &str, input: &str) -> EngineResult<WebspaceConfig> {
        let config = self.importer(format)?.import(input)?;
        config.validate()?;
        debug!(
            "Imported {} webspace(s) from {} configuration",
            config.webspaces.len(),
            format
        );
        Ok(config)
    }

    /// Read a configuration file, choosing the importer by extension
    pub fn load_path(&self, path: impl AsRef<Path>) -> EngineResult<WebspaceConfig> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();
        let importer = self
            .importers
            .values()
            .find(|importer| importer.extensions().contains(&extension.as_str()))
            .ok_or_else(|| EngineError::WebspaceFormatImporterNotFound {
                format: extension.clone(),
                available: self.formats(),
            })?;

        let input = std::fs::read_to_string(path)?;
        let config = importer.import(&input)?;
        config.validate()?;
        info!(
            path = %path.display(),
            webspaces = config.webspaces.len(),
            "Loaded webspace configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML_CONFIG: &str = r#"
        [[webspaces]]
        key = "sulu_io"
        resource_locator_strategy = "tree_full_edit"

        [[webspaces.localizations]]
        language = "en"
        default = true

        [[webspaces.portals]]
        key = "sulu_io"

        [[webspaces.portals.environments]]
        type = "prod"

        [[webspaces.portals.environments.urls]]
        url = "sulu.lo/{localization}"
    "#;

    #[test]
    fn test_toml_import() {
        let registry = ImporterRegistry::default();
        let config = registry.import("toml", TOML_CONFIG).unwrap();
        assert_eq!(config.webspaces.len(), 1);
        let webspace = &config.webspaces[0];
        assert_eq!(webspace.resource_locator_strategy, "tree_full_edit");
        assert_eq!(webspace.portals[0].environments[0].urls[0].url, "sulu.lo/{localization}");
    }

    #[test]
    fn test_json_import_uses_default_strategy() {
        let json = r#"{
            "webspaces": [{
                "key": "blog",
                "localizations": [{ "language": "de" }]
            }]
        }"#;
        let config = ImporterRegistry::default().import("json", json).unwrap();
        assert_eq!(config.webspaces[0].resource_locator_strategy, "tree_leaf_edit");
    }

    #[test]
    fn test_unknown_format_lists_available() {
        let err = ImporterRegistry::default().import("xml", "<webspace/>").unwrap_err();
        match err {
            EngineError::WebspaceFormatImporterNotFound { format, available } => {
                assert_eq!(format, "xml");
                assert_eq!(available, vec!["json".to_string(), "toml".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_malformed_input_is_serialization_error() {
        let err = ImporterRegistry::default().import("toml", "[[webspaces]").unwrap_err();
        assert!(matches!(err, EngineError::SerializationError(_)));
    }

    #[test]
    fn test_load_path_unknown_extension() {
        let err = ImporterRegistry::default()
            .load_path("webspaces.yaml")
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::WebspaceFormatImporterNotFound { .. }
        ));
    }

    #[test]
    fn test_load_path_reads_file() {
        let path = std::env::temp_dir().join(format!("webspaces-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, TOML_CONFIG).unwrap();
        let config = ImporterRegistry::default().load_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.webspaces[0].key, "sulu_io");
    }
}
