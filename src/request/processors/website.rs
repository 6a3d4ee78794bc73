// Copyright 2025 Cowboy AI, LLC.

//! Portal matching for website requests

use std::sync::Arc;

use tracing::debug;

use super::portal_information::portal_attributes;
use super::RequestProcessor;
use crate::errors::{EngineError, EngineResult};
use crate::request::attributes::{keys, RequestAttributes};
use crate::request::incoming::Request;
use crate::webspace::{PortalInformation, WebspaceManager};

/// Matches host and path against the portal urls of an environment
pub struct WebsiteRequestProcessor {
    manager: Arc<dyn WebspaceManager>,
    environment: String,
}

impl WebsiteRequestProcessor {
    /// Create the processor for an environment
    pub fn new(manager: Arc<dyn WebspaceManager>, environment: impl Into<String>) -> Self {
        Self {
            manager,
            environment: environment.into(),
        }
    }

    /// Best portal information, trying `host:port` before the bare host
    fn find(&self, request: &Request) -> Option<PortalInformation> {
        let path = request.decoded_path();
        let mut hosts = Vec::with_capacity(2);
        if request.explicit_port().is_some() {
            hosts.push(request.http_host());
        }
        hosts.push(request.host.clone());

        hosts.into_iter().find_map(|host| {
            self.manager
                .find_portal_informations_by_url(&format!("{host}{path}"), &self.environment)
                .into_iter()
                .next()
        })
    }
}

impl RequestProcessor for WebsiteRequestProcessor {
    fn name(&self) -> &'static str {
        "website"
    }

    fn process(&self, request: &Request, attributes: &RequestAttributes) -> RequestAttributes {
        if attributes.portal_information().is_some() {
            return RequestAttributes::new();
        }
        match self.find(request) {
            Some(information) => {
                debug!(
                    "Request {} matched {} ({})",
                    request.uri(),
                    information.url,
                    information.match_type
                );
                portal_attributes(request, &information)
            }
            None => {
                debug!("Request {} matched no portal", request.uri());
                RequestAttributes::new()
            }
        }
    }

    fn validate(&self, attributes: &RequestAttributes) -> EngineResult<()> {
        if attributes.portal_information().is_some() {
            return Ok(());
        }
        Err(EngineError::UrlMatchNotFound {
            url: attributes
                .text(keys::REQUEST_URI)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use crate::webspace::{MatchType, MockWebspaceManager};

    fn processor(environment: &str) -> WebsiteRequestProcessor {
        WebsiteRequestProcessor::new(test_support::manager(), environment)
    }

    #[test]
    fn test_full_match() {
        let request = Request::get("http://sulu.lo/de-at/products/machines").unwrap();
        let attributes = processor("prod").process(&request, &RequestAttributes::new());

        assert_eq!(attributes.match_type(), Some(MatchType::Full));
        assert_eq!(attributes.text(keys::RESOURCE_LOCATOR), Some("/products/machines"));
        assert_eq!(attributes.text(keys::RESOURCE_LOCATOR_PREFIX), Some("/de-at"));
        assert_eq!(attributes.localization().map(|l| l.locale()), Some("de_at".to_string()));
        assert_eq!(attributes.text(keys::PORTAL_URL), Some("sulu.lo/de-at"));
    }

    #[test]
    fn test_redirect_match_carries_redirect_only() {
        let request = Request::get("http://www.sulu.lo/about").unwrap();
        let attributes = processor("prod").process(&request, &RequestAttributes::new());

        assert_eq!(attributes.match_type(), Some(MatchType::Redirect));
        assert_eq!(attributes.text(keys::REDIRECT), Some("sulu.lo"));
        assert!(!attributes.contains(keys::RESOURCE_LOCATOR));
        assert!(attributes.webspace().is_none());
    }

    #[test]
    fn test_port_is_matched_before_host() {
        let request = Request::get("http://sulu.lo:8080/en/blog").unwrap();
        let attributes = processor("dev").process(&request, &RequestAttributes::new());
        assert_eq!(attributes.text(keys::PORTAL_URL), Some("sulu.lo:8080/en"));
        assert_eq!(attributes.text(keys::RESOURCE_LOCATOR), Some("/blog"));
    }

    #[test]
    fn test_missing_match_fails_validation_with_uri() {
        let mut manager = MockWebspaceManager::new();
        manager
            .expect_find_portal_informations_by_url()
            .times(1)
            .returning(|_, _| Vec::new());
        let processor = WebsiteRequestProcessor::new(Arc::new(manager), "prod");

        let request = Request::get("http://unknown.lo/path?x=1").unwrap();
        let attributes = processor
            .process(&request, &RequestAttributes::new())
            .merge(&RequestAttributes::new().with(keys::REQUEST_URI, request.uri()));

        assert!(attributes.portal_information().is_none());
        assert_eq!(
            processor.validate(&attributes).unwrap_err(),
            EngineError::UrlMatchNotFound {
                url: "http://unknown.lo/path?x=1".to_string()
            }
        );
    }

    #[test]
    fn test_existing_portal_information_is_kept() {
        let manager = MockWebspaceManager::new();
        let processor = WebsiteRequestProcessor::new(Arc::new(manager), "prod");
        let information = test_support::manager()
            .find_portal_informations_by_url("sulu.lo/en", "prod")
            .remove(0);
        let context = RequestAttributes::new().with(keys::PORTAL_INFORMATION, information);

        let request = Request::get("http://sulu.lo/en").unwrap();
        assert!(processor.process(&request, &context).is_empty());
        assert!(processor.validate(&context).is_ok());
    }
}
