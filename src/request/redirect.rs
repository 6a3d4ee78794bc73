// Copyright 2025 Cowboy AI, LLC.

//! Redirects answered before content is rendered

use serde::{Deserialize, Serialize};

use super::attributes::{keys, RequestAttributes};
use super::incoming::Request;

/// Permanent redirect status
pub const MOVED_PERMANENTLY: u16 = 301;

/// Redirect the http boundary should answer with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectResponse {
    /// Http status
    pub status: u16,
    /// Target url
    pub location: String,
}

impl RedirectResponse {
    /// Permanent redirect to `location`
    pub fn permanent(location: impl Into<String>) -> Self {
        Self {
            status: MOVED_PERMANENTLY,
            location: location.into(),
        }
    }
}

/// Redirect for an analyzed request, if one is due.
///
/// Partial and redirect portal matches redirect to their target, keeping
/// the path below the portal and the query. Full matches are normalized:
/// a trailing slash or an explicit `.html` suffix is removed.
pub fn resolve_redirect(
    request: &Request,
    attributes: &RequestAttributes,
) -> Option<RedirectResponse> {
    if let Some(information) = attributes.portal_information() {
        if information.match_type.is_redirect() {
            let target = information.redirect.as_deref()?;
            let remainder = request
                .path
                .strip_prefix(information.prefix())
                .unwrap_or(&request.path);
            return Some(RedirectResponse::permanent(portal_redirect_url(
                request, target, remainder,
            )));
        }
    }

    let path = request.path.as_str();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        return Some(RedirectResponse::permanent(format!(
            "{}{}{}",
            request.scheme_and_http_host(),
            trimmed,
            request.query_suffix()
        )));
    }
    if let Some(stripped) = path.strip_suffix(".html") {
        let stripped = if stripped.is_empty() { "/" } else { stripped };
        return Some(RedirectResponse::permanent(format!(
            "{}{}{}",
            request.scheme_and_http_host(),
            stripped,
            request.query_suffix()
        )));
    }
    None
}

/// Redirect from a moved locator to its replacement below the same portal
pub fn resolve_moved(
    request: &Request,
    attributes: &RequestAttributes,
    new_resource_locator: &str,
) -> RedirectResponse {
    let prefix = attributes.text(keys::RESOURCE_LOCATOR_PREFIX).unwrap_or_default();
    let format = attributes
        .text(keys::FORMAT)
        .map(|format| format!(".{format}"))
        .unwrap_or_default();
    let locator = if new_resource_locator == "/" && !prefix.is_empty() {
        ""
    } else {
        new_resource_locator
    };
    RedirectResponse::permanent(format!(
        "{}{}{}{}{}",
        request.scheme_and_http_host(),
        prefix,
        locator,
        format,
        request.query_suffix()
    ))
}

fn portal_redirect_url(request: &Request, target: &str, remainder: &str) -> String {
    let (target_host, target_path) = match target.find('/') {
        Some(idx) => target.split_at(idx),
        None => (target, ""),
    };
    let host = if target_host.is_empty() {
        request.host.as_str()
    } else {
        target_host
    };
    let port = match request.explicit_port() {
        Some(port) if !host.contains(':') => format!(":{port}"),
        _ => String::new(),
    };

    let path = format!("{target_path}{remainder}");
    let path = path.trim_end_matches('/');
    format!(
        "{}://{}{}{}{}",
        request.scheme,
        host,
        port,
        path,
        request.query_suffix()
    )
}
