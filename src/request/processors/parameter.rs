// Copyright 2025 Cowboy AI, LLC.

//! Portal lookup by `_portal` and `_locale` query parameters

use std::sync::Arc;

use tracing::debug;

use super::RequestProcessor;
use crate::request::attributes::{keys, RequestAttributes};
use crate::request::incoming::Request;
use crate::webspace::WebspaceManager;

/// Query parameter naming the portal
pub const PORTAL_PARAMETER: &str = "_portal";
/// Query parameter naming the locale
pub const LOCALE_PARAMETER: &str = "_locale";

/// Resolves the portal information without url matching
pub struct ParameterRequestProcessor {
    manager: Arc<dyn WebspaceManager>,
    environment: String,
}

impl ParameterRequestProcessor {
    /// Create the processor for an environment
    pub fn new(manager: Arc<dyn WebspaceManager>, environment: impl Into<String>) -> Self {
        Self {
            manager,
            environment: environment.into(),
        }
    }
}

impl RequestProcessor for ParameterRequestProcessor {
    fn name(&self) -> &'static str {
        "parameter"
    }

    fn process(&self, request: &Request, _attributes: &RequestAttributes) -> RequestAttributes {
        let (Some(portal), Some(locale)) = (
            request.query_param(PORTAL_PARAMETER),
            request.query_param(LOCALE_PARAMETER),
        ) else {
            return RequestAttributes::new();
        };

        let found = self
            .manager
            .find_portal_informations_by_portal_key_and_locale(portal, locale, &self.environment)
            .into_iter()
            .next();
        debug!(
            "Portal {} in {} resolved by parameters: {}",
            portal,
            locale,
            found.is_some()
        );
        RequestAttributes::new().with_opt(keys::PORTAL_INFORMATION, found)
    }
}
