// Copyright 2025 Cowboy AI, LLC.

//! Ordered request attribute bag

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{Localization, Segment, Webspace};
use crate::webspace::{MatchType, PortalInformation};

/// Attribute keys written by the processors
pub mod keys {
    /// Request scheme
    pub const SCHEME: &str = "scheme";
    /// Request host
    pub const HOST: &str = "host";
    /// Non-default request port
    pub const PORT: &str = "port";
    /// Decoded request path
    pub const PATH: &str = "path";
    /// Full request uri
    pub const REQUEST_URI: &str = "requestUri";
    /// Matched portal information
    pub const PORTAL_INFORMATION: &str = "portalInformation";
    /// Match type of the portal information
    pub const MATCH_TYPE: &str = "matchType";
    /// Webspace of the request
    pub const WEBSPACE: &str = "webspace";
    /// Webspace key
    pub const WEBSPACE_KEY: &str = "webspaceKey";
    /// Portal key
    pub const PORTAL: &str = "portal";
    /// Matched portal url
    pub const PORTAL_URL: &str = "portalUrl";
    /// Configured url pattern
    pub const URL_EXPRESSION: &str = "urlExpression";
    /// Resolved localization
    pub const LOCALIZATION: &str = "localization";
    /// Locale string of the localization (`de_at`)
    pub const LOCALE: &str = "locale";
    /// Resolved segment
    pub const SEGMENT: &str = "segment";
    /// Redirect target of partial and redirect matches
    pub const REDIRECT: &str = "redirect";
    /// Resource locator relative to the portal url
    pub const RESOURCE_LOCATOR: &str = "resourceLocator";
    /// Path prefix of the portal url
    pub const RESOURCE_LOCATOR_PREFIX: &str = "resourceLocatorPrefix";
    /// Format suffix (`json`)
    pub const FORMAT: &str = "format";
    /// Analytics key of the matched url
    pub const ANALYTICS_KEY: &str = "analyticsKey";
    /// Security system of the request
    pub const SYSTEM: &str = "system";
    /// Time the request was analyzed
    pub const DATE_TIME: &str = "dateTime";
}

/// Security system an authorization layer should check against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecuritySystem(pub String);

impl SecuritySystem {
    /// Name of the system
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecuritySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value stored under an attribute key
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Plain text
    Text(String),
    /// Integer
    Int(i64),
    /// Timestamp
    DateTime(DateTime<Utc>),
    /// Localization
    Localization(Localization),
    /// Segment
    Segment(Segment),
    /// Webspace configuration
    Webspace(Arc<Webspace>),
    /// Matched portal information
    PortalInformation(Box<PortalInformation>),
    /// Match type
    MatchType(MatchType),
    /// Security system
    System(SecuritySystem),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        AttributeValue::DateTime(value)
    }
}

impl From<Localization> for AttributeValue {
    fn from(value: Localization) -> Self {
        AttributeValue::Localization(value)
    }
}

impl From<Segment> for AttributeValue {
    fn from(value: Segment) -> Self {
        AttributeValue::Segment(value)
    }
}

impl From<Arc<Webspace>> for AttributeValue {
    fn from(value: Arc<Webspace>) -> Self {
        AttributeValue::Webspace(value)
    }
}

impl From<PortalInformation> for AttributeValue {
    fn from(value: PortalInformation) -> Self {
        AttributeValue::PortalInformation(Box::new(value))
    }
}

impl From<MatchType> for AttributeValue {
    fn from(value: MatchType) -> Self {
        AttributeValue::MatchType(value)
    }
}

impl From<SecuritySystem> for AttributeValue {
    fn from(value: SecuritySystem) -> Self {
        AttributeValue::System(value)
    }
}

/// Insertion ordered, immutable key value bag.
///
/// Processors never change a bag they receive. They return a new one which
/// the analyzer merges into the accumulator, the right-hand side winning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestAttributes {
    values: IndexMap<String, AttributeValue>,
}

impl RequestAttributes {
    /// Empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with one more attribute
    pub fn with(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Copy with the attribute when `value` is present
    pub fn with_opt<V: Into<AttributeValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// New bag holding both sides; keys of `other` override
    pub fn merge(&self, other: &RequestAttributes) -> RequestAttributes {
        let mut values = self.values.clone();
        for (key, value) in &other.values {
            values.insert(key.clone(), value.clone());
        }
        RequestAttributes { values }
    }

    /// Raw value
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    /// True when the key is set
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True without attributes
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Text attribute
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Integer attribute
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            AttributeValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Matched portal information
    pub fn portal_information(&self) -> Option<&PortalInformation> {
        match self.get(keys::PORTAL_INFORMATION)? {
            AttributeValue::PortalInformation(information) => Some(information),
            _ => None,
        }
    }

    /// Match type of the request
    pub fn match_type(&self) -> Option<MatchType> {
        match self.get(keys::MATCH_TYPE)? {
            AttributeValue::MatchType(match_type) => Some(*match_type),
            _ => None,
        }
    }

    /// Webspace of the request
    pub fn webspace(&self) -> Option<&Arc<Webspace>> {
        match self.get(keys::WEBSPACE)? {
            AttributeValue::Webspace(webspace) => Some(webspace),
            _ => None,
        }
    }

    /// Resolved localization
    pub fn localization(&self) -> Option<&Localization> {
        match self.get(keys::LOCALIZATION)? {
            AttributeValue::Localization(localization) => Some(localization),
            _ => None,
        }
    }

    /// Resolved segment
    pub fn segment(&self) -> Option<&Segment> {
        match self.get(keys::SEGMENT)? {
            AttributeValue::Segment(segment) => Some(segment),
            _ => None,
        }
    }

    /// Security system of the request
    pub fn system(&self) -> Option<&SecuritySystem> {
        match self.get(keys::SYSTEM)? {
            AttributeValue::System(system) => Some(system),
            _ => None,
        }
    }

    /// Analysis timestamp
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        match self.get(keys::DATE_TIME)? {
            AttributeValue::DateTime(date_time) => Some(*date_time),
            _ => None,
        }
    }
}
