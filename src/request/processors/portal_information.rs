// Copyright 2025 Cowboy AI, LLC.

//! Attributes derived from a matched portal information

use std::sync::Arc;

use super::RequestProcessor;
use crate::config::Localization;
use crate::request::attributes::{keys, RequestAttributes};
use crate::request::incoming::Request;
use crate::webspace::{MatchType, PortalInformation};

/// Full attribute set of a request matched to `information`.
///
/// Redirect matches only carry the redirect information.
pub(crate) fn portal_attributes(
    request: &Request,
    information: &PortalInformation,
) -> RequestAttributes {
    let attributes = RequestAttributes::new()
        .with(keys::PORTAL_INFORMATION, information.clone())
        .with(keys::MATCH_TYPE, information.match_type)
        .with_opt(keys::REDIRECT, information.redirect.clone());
    if information.match_type == MatchType::Redirect {
        return attributes;
    }

    let localization = information.effective_localization();
    let (resource_locator, format) =
        split_resource_locator(&request.decoded_path(), information.prefix());
    attributes
        .with(keys::WEBSPACE, Arc::clone(&information.webspace))
        .with(keys::WEBSPACE_KEY, information.webspace_key())
        .with(keys::PORTAL, information.portal_key.as_str())
        .with(keys::PORTAL_URL, information.url.as_str())
        .with(keys::URL_EXPRESSION, information.url_expression.as_str())
        .with(keys::RESOURCE_LOCATOR_PREFIX, information.prefix())
        .with(keys::RESOURCE_LOCATOR, resource_locator)
        .with_opt(keys::FORMAT, format)
        .with_opt(keys::LOCALE, localization.as_ref().map(Localization::locale))
        .with_opt(keys::LOCALIZATION, localization)
        .with_opt(keys::SEGMENT, information.segment.clone())
        .with_opt(keys::ANALYTICS_KEY, information.analytics_key.clone())
}

/// Split `path` into the locator below `prefix` and an optional format suffix
pub(crate) fn split_resource_locator(path: &str, prefix: &str) -> (String, Option<String>) {
    let (directory, last) = match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    };
    let (name, format) = match last.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < last.len() => {
            (&last[..idx], Some(last[idx + 1..].to_string()))
        }
        _ => (last, None),
    };

    let path = format!("{directory}{name}");
    let locator = path.strip_prefix(prefix).unwrap_or(&path);
    let locator = if locator.is_empty() {
        "/".to_string()
    } else if locator.starts_with('/') {
        locator.to_string()
    } else {
        format!("/{locator}")
    };
    (locator, format)
}

/// Derives the attribute set when the portal was found without url matching
#[derive(Debug, Clone, Copy, Default)]
pub struct PortalInformationRequestProcessor;

impl RequestProcessor for PortalInformationRequestProcessor {
    fn name(&self) -> &'static str {
        "portal_information"
    }

    fn process(&self, request: &Request, attributes: &RequestAttributes) -> RequestAttributes {
        match attributes.portal_information() {
            Some(information) if !attributes.contains(keys::MATCH_TYPE) => {
                portal_attributes(request, information)
            }
            _ => RequestAttributes::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use crate::webspace::WebspaceManager;
    use test_case::test_case;

    #[test_case("/en/articles/list.json", "/en" => ("/articles/list".to_string(), Some("json".to_string())) ; "format")]
    #[test_case("/en", "/en" => ("/".to_string(), None) ; "portal root")]
    #[test_case("/en/", "/en" => ("/".to_string(), None) ; "portal root with slash")]
    #[test_case("/articles", "" => ("/articles".to_string(), None) ; "no prefix")]
    #[test_case("/en/v1.2/.hidden", "/en" => ("/v1.2/.hidden".to_string(), None) ; "dot files")]
    #[test_case("/en/file.", "/en" => ("/file.".to_string(), None) ; "empty format")]
    fn test_split_resource_locator(path: &str, prefix: &str) -> (String, Option<String>) {
        split_resource_locator(path, prefix)
    }

    #[test]
    fn test_derives_attributes_from_parameter_match() {
        let manager = test_support::manager();
        let information = manager
            .find_portal_informations_by_portal_key_and_locale("sulu_io", "de_at", "prod")
            .remove(0);
        let request = Request::get("http://sulu.lo/de-at/news.json").unwrap();
        let context = RequestAttributes::new().with(keys::PORTAL_INFORMATION, information);

        let attributes = PortalInformationRequestProcessor.process(&request, &context);
        assert_eq!(attributes.match_type(), Some(MatchType::Full));
        assert_eq!(attributes.text(keys::LOCALE), Some("de_at"));
        assert_eq!(attributes.text(keys::RESOURCE_LOCATOR), Some("/news"));
        assert_eq!(attributes.text(keys::FORMAT), Some("json"));
        assert_eq!(attributes.text(keys::ANALYTICS_KEY), Some("UA-1"));
        assert_eq!(attributes.webspace().map(|w| w.key.as_str()), Some("sulu_io"));
    }

    #[test]
    fn test_skips_already_derived_attributes() {
        let manager = test_support::manager();
        let information = manager.find_portal_informations_by_url("sulu.lo/en", "prod").remove(0);
        let request = Request::get("http://sulu.lo/en").unwrap();
        let context = portal_attributes(&request, &information);

        assert!(PortalInformationRequestProcessor
            .process(&request, &context)
            .is_empty());
        assert!(PortalInformationRequestProcessor
            .process(&request, &RequestAttributes::new())
            .is_empty());
    }
}
