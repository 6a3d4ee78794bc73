// Copyright 2025 Cowboy AI, LLC.

//! Matchable portal urls

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::{Localization, Portal, Segment, Webspace};

/// How a request url relates to a configured portal url
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// Url fully identifies portal, localization and segment
    Full,
    /// Url lacks the localization part and redirects to the default one
    Partial,
    /// Url is configured as redirect
    Redirect,
    /// Url matched through a `*` host label
    Wildcard,
}

impl MatchType {
    /// Base priority used to order candidate matches
    pub fn priority(self) -> i32 {
        match self {
            MatchType::Full => 10,
            MatchType::Wildcard => 8,
            MatchType::Partial => 5,
            MatchType::Redirect => 4,
        }
    }

    /// True for matches that answer with a redirect
    pub fn is_redirect(self) -> bool {
        matches!(self, MatchType::Partial | MatchType::Redirect)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchType::Full => "full",
            MatchType::Partial => "partial",
            MatchType::Redirect => "redirect",
            MatchType::Wildcard => "wildcard",
        };
        f.write_str(name)
    }
}

/// One matchable url of a portal in one environment.
///
/// Built once from configuration. Wildcard lookups hand out copies whose
/// `url` has the `*` label replaced by the requested host.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalInformation {
    /// Match classification
    pub match_type: MatchType,
    /// Owning webspace
    pub webspace: Arc<Webspace>,
    /// Key of the portal inside the webspace
    pub portal_key: String,
    /// Environment the url belongs to
    pub environment: String,
    /// Concrete url without scheme
    pub url: String,
    /// Url pattern as configured
    pub url_expression: String,
    /// Localization encoded in the url
    pub localization: Option<Localization>,
    /// Segment encoded in the url
    pub segment: Option<Segment>,
    /// Redirect target for partial and redirect matches
    pub redirect: Option<String>,
    /// Analytics key of the url
    pub analytics_key: Option<String>,
    /// Main url flag
    pub main: bool,
    /// Ordering priority, higher wins
    pub priority: i32,
}

impl PortalInformation {
    /// Key of the owning webspace
    pub fn webspace_key(&self) -> &str {
        &self.webspace.key
    }

    /// The portal configuration
    pub fn portal(&self) -> Option<&Portal> {
        self.webspace.portal(&self.portal_key)
    }

    /// Host part of the url (everything before the first `/`)
    pub fn host(&self) -> &str {
        match self.url.find('/') {
            Some(idx) => &self.url[..idx],
            None => &self.url,
        }
    }

    /// Path prefix of the url (`/en` for `sulu.lo/en`), empty without one
    pub fn prefix(&self) -> &str {
        match self.url.find('/') {
            Some(idx) => &self.url[idx..],
            None => "",
        }
    }

    /// Localization of the url or the portal default
    pub fn effective_localization(&self) -> Option<Localization> {
        if let Some(localization) = &self.localization {
            return Some(localization.clone());
        }
        self.portal()
            .and_then(|portal| self.webspace.portal_default_localization(portal))
            .or_else(|| self.webspace.default_localization())
            .cloned()
    }
}
