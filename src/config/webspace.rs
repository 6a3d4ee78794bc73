// Copyright 2025 Cowboy AI, LLC.

//! Webspace configuration model.
//!
//! These types are deserialized from configuration files and shared
//! read-only by the webspace manager, the request processors and the
//! resource-locator strategy pool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::errors::{EngineError, EngineResult};

/// Strategy used when a webspace does not declare one.
pub const DEFAULT_RESOURCE_LOCATOR_STRATEGY: &str = "tree_leaf_edit";

/// Language plus optional country (`de`, `de_at`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Localization {
    /// ISO language code
    pub language: String,
    /// Optional country code
    #[serde(default)]
    pub country: Option<String>,
    /// Marks the default localization of a webspace or portal
    #[serde(default)]
    pub default: bool,
}

impl Localization {
    /// Create a localization from its parts.
    pub fn new(language: impl Into<String>, country: Option<&str>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            country: country.map(str::to_lowercase),
            default: false,
        }
    }

    /// Parse `de`, `de_at` or `de-at`.
    pub fn from_locale(locale: &str) -> Self {
        let mut parts = locale.splitn(2, ['_', '-']);
        let language = parts.next().unwrap_or_default();
        Self::new(language, parts.next())
    }

    /// Locale joined with `_` (`de_at`).
    pub fn locale(&self) -> String {
        self.locale_with('_')
    }

    /// Locale joined with the given delimiter.
    pub fn locale_with(&self, delimiter: char) -> String {
        match &self.country {
            Some(country) => format!("{}{}{}", self.language, delimiter, country),
            None => self.language.clone(),
        }
    }

    /// Compare the locale ignoring the default flag and delimiter.
    pub fn matches_locale(&self, locale: &str) -> bool {
        let other = Localization::from_locale(locale);
        self.language == other.language && self.country == other.country
    }
}

impl fmt::Display for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.locale())
    }
}

/// Audience segment of a webspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Segment key (used in urls and cookies)
    pub key: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Marks the default segment
    #[serde(default)]
    pub default: bool,
}

/// Security settings of a webspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SecurityConfig {
    /// Name of the security system the website uses
    pub system: String,
    /// Whether permissions are checked on website requests
    #[serde(default)]
    pub permission_check: bool,
}

/// One configured url of a portal environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UrlDefinition {
    /// Url pattern without scheme, e.g. `sulu.lo/{localization}`
    pub url: String,
    /// Fixed language for urls without placeholder
    #[serde(default)]
    pub language: Option<String>,
    /// Fixed country for urls without placeholder
    #[serde(default)]
    pub country: Option<String>,
    /// Fixed segment for urls without placeholder
    #[serde(default)]
    pub segment: Option<String>,
    /// Redirect target; turns the url into a redirect match
    #[serde(default)]
    pub redirect: Option<String>,
    /// Analytics key exposed as request attribute
    #[serde(default)]
    pub analytics_key: Option<String>,
    /// Main url of the environment
    #[serde(default)]
    pub main: bool,
}

impl UrlDefinition {
    /// Create a plain url definition.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            language: None,
            country: None,
            segment: None,
            redirect: None,
            analytics_key: None,
            main: false,
        }
    }
}

/// Portal environment (`prod`, `stage`, `dev`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Environment {
    /// Environment type
    #[serde(rename = "type")]
    pub kind: String,
    /// Urls served in this environment
    #[serde(default)]
    pub urls: Vec<UrlDefinition>,
}

/// Portal of a webspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Portal {
    /// Portal key
    pub key: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Portal localizations; empty means the webspace localizations
    #[serde(default)]
    pub localizations: Vec<Localization>,
    /// Configured environments
    #[serde(default)]
    pub environments: Vec<Environment>,
}

impl Portal {
    /// Environment by type.
    pub fn environment(&self, kind: &str) -> Option<&Environment> {
        self.environments.iter().find(|env| env.kind == kind)
    }
}

/// Top-level site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Webspace {
    /// Webspace key
    pub key: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Available localizations
    #[serde(default)]
    pub localizations: Vec<Localization>,
    /// Available segments
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Portals of the webspace
    #[serde(default)]
    pub portals: Vec<Portal>,
    /// Resource-locator strategy name
    #[serde(default = "default_strategy")]
    pub resource_locator_strategy: String,
    /// Website security settings
    #[serde(default)]
    pub security: Option<SecurityConfig>,
}

fn default_strategy() -> String {
    DEFAULT_RESOURCE_LOCATOR_STRATEGY.to_string()
}

impl Webspace {
    /// Localization by locale.
    pub fn localization(&self, locale: &str) -> Option<&Localization> {
        self.localizations
            .iter()
            .find(|localization| localization.matches_locale(locale))
    }

    /// The default localization, or the first one.
    pub fn default_localization(&self) -> Option<&Localization> {
        self.localizations
            .iter()
            .find(|localization| localization.default)
            .or_else(|| self.localizations.first())
    }

    /// Segment by key.
    pub fn segment(&self, key: &str) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.key == key)
    }

    /// The default segment, or the first one.
    pub fn default_segment(&self) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|segment| segment.default)
            .or_else(|| self.segments.first())
    }

    /// Portal by key.
    pub fn portal(&self, key: &str) -> Option<&Portal> {
        self.portals.iter().find(|portal| portal.key == key)
    }

    /// Localizations a portal serves.
    pub fn portal_localizations<'a>(&'a self, portal: &'a Portal) -> &'a [Localization] {
        if portal.localizations.is_empty() {
            &self.localizations
        } else {
            &portal.localizations
        }
    }

    /// Default localization of a portal.
    pub fn portal_default_localization<'a>(
        &'a self,
        portal: &'a Portal,
    ) -> Option<&'a Localization> {
        let localizations = self.portal_localizations(portal);
        localizations
            .iter()
            .find(|localization| localization.default)
            .or_else(|| localizations.first())
    }

    /// Security system configured for the website, if any.
    pub fn security_system(&self) -> Option<&str> {
        self.security.as_ref().map(|security| security.system.as_str())
    }
}

/// Complete webspace configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WebspaceConfig {
    /// Configured webspaces
    #[serde(default)]
    pub webspaces: Vec<Webspace>,
}

impl WebspaceConfig {
    /// Check keys, localizations and strategy declarations.
    pub fn validate(&self) -> EngineResult<()> {
        let mut webspace_keys = HashSet::new();
        let mut portal_keys = HashSet::new();

        for webspace in &self.webspaces {
            if webspace.key.trim().is_empty() {
                return Err(EngineError::InvalidConfiguration(
                    "webspace key must not be empty".to_string(),
                ));
            }
            if !webspace_keys.insert(webspace.key.as_str()) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "duplicate webspace key \"{}\"",
                    webspace.key
                )));
            }
            if webspace.localizations.is_empty() {
                return Err(EngineError::InvalidConfiguration(format!(
                    "webspace \"{}\" has no localizations",
                    webspace.key
                )));
            }
            if webspace.localizations.iter().filter(|l| l.default).count() > 1 {
                return Err(EngineError::InvalidConfiguration(format!(
                    "webspace \"{}\" declares more than one default localization",
                    webspace.key
                )));
            }
            if webspace.segments.iter().filter(|s| s.default).count() > 1 {
                return Err(EngineError::InvalidConfiguration(format!(
                    "webspace \"{}\" declares more than one default segment",
                    webspace.key
                )));
            }
            if webspace.resource_locator_strategy.trim().is_empty() {
                return Err(EngineError::InvalidConfiguration(format!(
                    "webspace \"{}\" declares an empty resource locator strategy",
                    webspace.key
                )));
            }

            for portal in &webspace.portals {
                if !portal_keys.insert(portal.key.as_str()) {
                    return Err(EngineError::InvalidConfiguration(format!(
                        "duplicate portal key \"{}\"",
                        portal.key
                    )));
                }
                for url in portal.environments.iter().flat_map(|env| env.urls.iter()) {
                    validate_url(webspace, url)?;
                }
            }
        }

        Ok(())
    }

    /// Webspace by key.
    pub fn webspace(&self, key: &str) -> Option<&Webspace> {
        self.webspaces.iter().find(|webspace| webspace.key == key)
    }
}

fn validate_url(webspace: &Webspace, url: &UrlDefinition) -> EngineResult<()> {
    if url.url.trim().is_empty() {
        return Err(EngineError::InvalidConfiguration(format!(
            "webspace \"{}\" contains an empty url",
            webspace.key
        )));
    }
    if url.url.contains("://") {
        return Err(EngineError::InvalidConfiguration(format!(
            "url \"{}\" must not contain a scheme",
            url.url
        )));
    }
    if let Some(language) = &url.language {
        let locale = match &url.country {
            Some(country) => format!("{language}_{country}"),
            None => language.clone(),
        };
        if webspace.localization(&locale).is_none() {
            return Err(EngineError::InvalidConfiguration(format!(
                "url \"{}\" references unknown localization \"{}\"",
                url.url, locale
            )));
        }
    }
    if let Some(segment) = &url.segment {
        if webspace.segment(segment).is_none() {
            return Err(EngineError::InvalidConfiguration(format!(
                "url \"{}\" references unknown segment \"{}\"",
                url.url, segment
            )));
        }
    }
    Ok(())
}
