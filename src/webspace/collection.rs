// Copyright 2025 Cowboy AI, LLC.

//! Builds the portal informations of a webspace configuration

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::portal_information::{MatchType, PortalInformation};
use super::url_pattern::{self, WildcardMatcher};
use crate::config::{Localization, Portal, Segment, UrlDefinition, Webspace, WebspaceConfig};

/// Portal information together with its compiled wildcard matcher
#[derive(Debug, Clone)]
pub(crate) struct IndexedInformation {
    pub(crate) information: PortalInformation,
    pub(crate) wildcard: Option<WildcardMatcher>,
}

/// All portal informations of a configuration, grouped by environment
#[derive(Debug, Clone, Default)]
pub(crate) struct PortalCollection {
    pub(crate) webspaces: Vec<Arc<Webspace>>,
    pub(crate) environments: HashMap<String, Vec<IndexedInformation>>,
}

impl PortalCollection {
    pub(crate) fn build(config: &WebspaceConfig) -> Self {
        let mut collection = PortalCollection::default();

        for webspace in &config.webspaces {
            let webspace = Arc::new(webspace.clone());
            for portal in &webspace.portals {
                for environment in &portal.environments {
                    let entries = collection
                        .environments
                        .entry(environment.kind.clone())
                        .or_default();
                    for url in &environment.urls {
                        for information in build_url(&webspace, portal, &environment.kind, url) {
                            entries.push(index(information));
                        }
                    }
                }
            }
            collection.webspaces.push(webspace);
        }

        for (environment, entries) in &collection.environments {
            debug!(
                "Built {} portal informations for environment {}",
                entries.len(),
                environment
            );
        }
        collection
    }
}

fn index(information: PortalInformation) -> IndexedInformation {
    let wildcard = if information.match_type == MatchType::Wildcard {
        match WildcardMatcher::new(&information.url) {
            Ok(matcher) => Some(matcher),
            Err(err) => {
                warn!(url = %information.url, error = %err, "Unusable wildcard url");
                None
            }
        }
    } else {
        None
    };
    IndexedInformation {
        information,
        wildcard,
    }
}

struct UrlContext<'a> {
    webspace: &'a Arc<Webspace>,
    portal: &'a Portal,
    environment: &'a str,
    url: &'a UrlDefinition,
}

impl UrlContext<'_> {
    fn information(
        &self,
        match_type: MatchType,
        url: String,
        localization: Option<Localization>,
        segment: Option<Segment>,
        redirect: Option<String>,
    ) -> PortalInformation {
        let priority = match_type.priority() + i32::from(self.url.main);
        PortalInformation {
            match_type,
            webspace: Arc::clone(self.webspace),
            portal_key: self.portal.key.clone(),
            environment: self.environment.to_string(),
            url,
            url_expression: self.url.url.clone(),
            localization,
            segment,
            redirect,
            analytics_key: self.url.analytics_key.clone(),
            main: self.url.main,
            priority,
        }
    }

    fn full_type(&self) -> MatchType {
        if url_pattern::has_wildcard(&self.url.url) {
            MatchType::Wildcard
        } else {
            MatchType::Full
        }
    }

    fn fixed_localization(&self) -> Option<Localization> {
        let language = self.url.language.as_deref()?;
        let locale = match &self.url.country {
            Some(country) => format!("{language}_{country}"),
            None => language.to_string(),
        };
        self.webspace
            .localization(&locale)
            .cloned()
            .or_else(|| Some(Localization::from_locale(&locale)))
    }

    fn fixed_segment(&self) -> Option<Segment> {
        let key = self.url.segment.as_deref()?;
        self.webspace.segment(key).cloned()
    }

    fn segments(&self) -> Vec<Option<Segment>> {
        if url_pattern::has_segment(&self.url.url) && !self.webspace.segments.is_empty() {
            self.webspace.segments.iter().cloned().map(Some).collect()
        } else {
            vec![self.fixed_segment()]
        }
    }
}

fn build_url(
    webspace: &Arc<Webspace>,
    portal: &Portal,
    environment: &str,
    url: &UrlDefinition,
) -> Vec<PortalInformation> {
    let ctx = UrlContext {
        webspace,
        portal,
        environment,
        url,
    };

    if let Some(redirect) = &url.redirect {
        let localization = ctx.fixed_localization();
        let concrete = url_pattern::replace(&url.url, localization.as_ref(), None);
        return vec![ctx.information(
            MatchType::Redirect,
            concrete,
            localization,
            ctx.fixed_segment(),
            Some(redirect.clone()),
        )];
    }

    if !url_pattern::has_localization(&url.url) {
        let localization = ctx.fixed_localization();
        return ctx
            .segments()
            .into_iter()
            .map(|segment| {
                let concrete =
                    url_pattern::replace(&url.url, localization.as_ref(), segment.as_ref());
                ctx.information(ctx.full_type(), concrete, localization.clone(), segment, None)
            })
            .collect();
    }

    let localizations = webspace.portal_localizations(portal);
    let mut informations = Vec::new();
    for localization in localizations {
        for segment in ctx.segments() {
            let concrete = url_pattern::replace(&url.url, Some(localization), segment.as_ref());
            informations.push(ctx.information(
                ctx.full_type(),
                concrete,
                Some(localization.clone()),
                segment,
                None,
            ));
        }
    }

    let default_localization = webspace.portal_default_localization(portal);
    let default_segment = if url_pattern::has_segment(&url.url) {
        webspace.default_segment()
    } else {
        None
    };
    let redirect = url_pattern::replace(&url.url, default_localization, default_segment);
    informations.push(ctx.information(
        MatchType::Partial,
        url_pattern::strip(&url.url),
        None,
        None,
        Some(redirect),
    ));

    informations
}
