// Copyright 2025 Cowboy AI, LLC.

//! Identifier types for content, routes and locator scopes

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Content UUID - opaque reference to a content node
///
/// The resource-locator subsystem never inspects the content payload,
/// it only associates paths with these references.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct ContentUuid(Uuid);

impl ContentUuid {
    /// Create a new random content reference
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContentUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContentUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentUuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<ContentUuid> for Uuid {
    fn from(id: ContentUuid) -> Self {
        id.0
    }
}

/// Route ID - identifies one node of a locator tree
///
/// Routes are not content: history routes keep their id after being
/// superseded so callers can reference a concrete record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct RouteId(Uuid);

impl RouteId {
    /// Create a new random route ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User performing a write, recorded as the changer of cascaded documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scope of one locator tree: webspace + locale + optional segment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct LocatorScope {
    /// Webspace key
    pub webspace: String,
    /// Locale (e.g. `de_at`)
    pub locale: String,
    /// Segment key, `None` for the unsegmented tree
    pub segment: Option<String>,
}

impl LocatorScope {
    /// Create a scope without segment
    pub fn new(webspace: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            webspace: webspace.into(),
            locale: locale.into(),
            segment: None,
        }
    }

    /// Return a copy bound to the given segment
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }
}

impl fmt::Display for LocatorScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.segment {
            Some(segment) => write!(f, "{}/{}/{}", self.webspace, self.locale, segment),
            None => write!(f, "{}/{}", self.webspace, self.locale),
        }
    }
}
