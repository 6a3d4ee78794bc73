// Copyright 2025 Cowboy AI, LLC.

//! Portal lookup by url, portal key and resource locator

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use super::collection::{IndexedInformation, PortalCollection};
use super::portal_information::{MatchType, PortalInformation};
use super::url_pattern;
use crate::config::{EngineSettings, Webspace, WebspaceConfig};

/// Read access to the configured webspaces and their portal urls
#[cfg_attr(test, mockall::automock)]
pub trait WebspaceManager: Send + Sync {
    /// Webspace by key
    fn find_webspace_by_key(&self, key: &str) -> Option<Arc<Webspace>>;

    /// All configured webspaces
    fn webspaces(&self) -> Vec<Arc<Webspace>>;

    /// Every portal information of an environment, in configuration order
    fn portal_informations(&self, environment: &str) -> Vec<PortalInformation>;

    /// Portal informations matching `url` (host and path, no scheme),
    /// best candidate first
    fn find_portal_informations_by_url(
        &self,
        url: &str,
        environment: &str,
    ) -> Vec<PortalInformation>;

    /// Full matches of a portal serving the given locale, best candidate first
    fn find_portal_informations_by_portal_key_and_locale(
        &self,
        portal_key: &str,
        locale: &str,
        environment: &str,
    ) -> Vec<PortalInformation>;

    /// Absolute urls under which a resource locator is reachable
    fn find_urls_by_resource_locator(
        &self,
        resource_locator: &str,
        environment: &str,
        locale: &str,
        webspace_key: &str,
        scheme: &str,
    ) -> Vec<String>;
}

/// Webspace manager backed by an in-memory configuration
pub struct StaticWebspaceManager {
    collection: PortalCollection,
    /// Entries that can match a host, keyed by environment and host
    cache: Mutex<LruCache<(String, String), Arc<[usize]>>>,
}

impl StaticWebspaceManager {
    /// Build all portal informations of `config`
    pub fn new(config: &WebspaceConfig, settings: &EngineSettings) -> Self {
        let capacity = NonZeroUsize::new(settings.url_cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            collection: PortalCollection::build(config),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn entries(&self, environment: &str) -> &[IndexedInformation] {
        self.collection
            .environments
            .get(environment)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Indices of the entries whose url can match a request on `host`
    fn host_candidates(&self, host: &str, environment: &str) -> Arc<[usize]> {
        let key = (environment.to_string(), host.to_string());
        if let Some(cached) = self.cache.lock().get(&key) {
            return cached.clone();
        }

        let indices: Arc<[usize]> = self
            .entries(environment)
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                if entry.wildcard.is_some() {
                    return true;
                }
                let portal_url = entry.information.url.as_str();
                match portal_url.split_once('/') {
                    Some((portal_host, _)) => portal_host == host,
                    None => url_pattern::matches(host, portal_url),
                }
            })
            .map(|(idx, _)| idx)
            .collect();
        debug!(
            "Cached {} candidate portal informations for {} in {}",
            indices.len(),
            host,
            environment
        );
        self.cache.lock().put(key, indices.clone());
        indices
    }

    fn lookup(&self, url: &str, environment: &str) -> Vec<PortalInformation> {
        let host = url.split_once('/').map_or(url, |(host, _)| host);
        let entries = self.entries(environment);
        let mut candidates: Vec<PortalInformation> = self
            .host_candidates(host, environment)
            .iter()
            .filter_map(|idx| entries.get(*idx))
            .filter_map(|entry| match &entry.wildcard {
                Some(matcher) => {
                    let labels = matcher.captures(url)?;
                    let mut information = entry.information.clone();
                    information.url = url_pattern::fill_wildcards(&information.url, &labels);
                    information.redirect = information
                        .redirect
                        .map(|redirect| url_pattern::fill_wildcards(&redirect, &labels));
                    Some(information)
                }
                None if url_pattern::matches(url, &entry.information.url) => {
                    Some(entry.information.clone())
                }
                None => None,
            })
            .collect();
        sort_candidates(&mut candidates);
        candidates
    }
}

fn sort_candidates(candidates: &mut [PortalInformation]) {
    candidates.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.url.len().cmp(&a.url.len()))
    });
}

impl WebspaceManager for StaticWebspaceManager {
    fn find_webspace_by_key(&self, key: &str) -> Option<Arc<Webspace>> {
        self.collection
            .webspaces
            .iter()
            .find(|webspace| webspace.key == key)
            .cloned()
    }

    fn webspaces(&self) -> Vec<Arc<Webspace>> {
        self.collection.webspaces.clone()
    }

    fn portal_informations(&self, environment: &str) -> Vec<PortalInformation> {
        self.entries(environment)
            .iter()
            .map(|entry| entry.information.clone())
            .collect()
    }

    fn find_portal_informations_by_url(
        &self,
        url: &str,
        environment: &str,
    ) -> Vec<PortalInformation> {
        let candidates = self.lookup(url, environment);
        debug!(
            "Matched {} portal informations for {} in {}",
            candidates.len(),
            url,
            environment
        );
        candidates
    }

    fn find_portal_informations_by_portal_key_and_locale(
        &self,
        portal_key: &str,
        locale: &str,
        environment: &str,
    ) -> Vec<PortalInformation> {
        let mut candidates: Vec<PortalInformation> = self
            .entries(environment)
            .iter()
            .map(|entry| &entry.information)
            .filter(|information| {
                information.portal_key == portal_key
                    && information.match_type == MatchType::Full
                    && information
                        .localization
                        .as_ref()
                        .is_some_and(|localization| localization.matches_locale(locale))
            })
            .cloned()
            .collect();
        sort_candidates(&mut candidates);
        candidates
    }

    fn find_urls_by_resource_locator(
        &self,
        resource_locator: &str,
        environment: &str,
        locale: &str,
        webspace_key: &str,
        scheme: &str,
    ) -> Vec<String> {
        let path = resource_locator.trim_end_matches('/');
        self.entries(environment)
            .iter()
            .map(|entry| &entry.information)
            .filter(|information| {
                information.match_type == MatchType::Full
                    && information.webspace_key() == webspace_key
                    && information
                        .effective_localization()
                        .is_some_and(|localization| localization.matches_locale(locale))
            })
            .map(|information| format!("{scheme}://{}{path}", information.url))
            .collect()
    }
}
