// Copyright 2025 Cowboy AI, LLC.

//! # Configuration
//!
//! Webspace configuration types, format importers and engine settings.

mod importer;
mod settings;
mod webspace;

pub use importer::{FormatImporter, ImporterRegistry, JsonImporter, TomlImporter};
pub use settings::{EngineSettings, ADMIN_SECURITY_SYSTEM};
pub use webspace::{
    Environment, Localization, Portal, SecurityConfig, Segment, UrlDefinition, Webspace,
    WebspaceConfig, DEFAULT_RESOURCE_LOCATOR_STRATEGY,
};

/// JSON schema of the webspace configuration format
pub fn webspace_config_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(WebspaceConfig)
}
