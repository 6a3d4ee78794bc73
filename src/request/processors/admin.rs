// Copyright 2025 Cowboy AI, LLC.

//! Webspace and locale of admin requests

use std::sync::Arc;

use super::RequestProcessor;
use crate::request::attributes::{keys, RequestAttributes};
use crate::request::incoming::Request;
use crate::webspace::WebspaceManager;

/// Reads `webspace`, `locale` and `language` from the query of admin requests
pub struct AdminRequestProcessor {
    manager: Arc<dyn WebspaceManager>,
}

impl AdminRequestProcessor {
    /// Create the processor
    pub fn new(manager: Arc<dyn WebspaceManager>) -> Self {
        Self { manager }
    }
}

impl RequestProcessor for AdminRequestProcessor {
    fn name(&self) -> &'static str {
        "admin"
    }

    fn process(&self, request: &Request, _attributes: &RequestAttributes) -> RequestAttributes {
        let Some(webspace_key) = request.query_param("webspace") else {
            return RequestAttributes::new();
        };

        let locale = request
            .query_param("locale")
            .or_else(|| request.query_param("language"));
        let webspace = self.manager.find_webspace_by_key(webspace_key);
        let localization = webspace
            .as_ref()
            .zip(locale)
            .and_then(|(webspace, locale)| webspace.localization(locale).cloned());

        RequestAttributes::new()
            .with(keys::WEBSPACE_KEY, webspace_key)
            .with_opt(keys::WEBSPACE, webspace)
            .with_opt(keys::LOCALE, locale)
            .with_opt(keys::LOCALIZATION, localization)
    }
}
