// Copyright 2025 Cowboy AI, LLC.

//! Engine-wide settings

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Security system name used for admin requests.
pub const ADMIN_SECURITY_SYSTEM: &str = "Sulu";

/// Settings shared by the request analyzers and the webspace manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineSettings {
    /// Environment whose portal urls are matched (`prod`, `stage`, `dev`)
    pub environment: String,
    /// Security system assigned to admin requests
    pub admin_system: String,
    /// Number of url lookups memoised by the webspace manager
    pub url_cache_capacity: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            environment: "prod".to_string(),
            admin_system: ADMIN_SECURITY_SYSTEM.to_string(),
            url_cache_capacity: 256,
        }
    }
}

impl EngineSettings {
    /// Settings for another environment
    pub fn for_environment(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            ..Self::default()
        }
    }
}
