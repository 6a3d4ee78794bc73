// Copyright 2025 Cowboy AI, LLC.

//! Scheme, host, port and path of the request

use super::RequestProcessor;
use crate::request::attributes::{keys, RequestAttributes};
use crate::request::incoming::Request;

/// Copies the url parts of the request into the attributes
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlRequestProcessor;

impl RequestProcessor for UrlRequestProcessor {
    fn name(&self) -> &'static str {
        "url"
    }

    fn process(&self, request: &Request, _attributes: &RequestAttributes) -> RequestAttributes {
        RequestAttributes::new()
            .with(keys::SCHEME, request.scheme.as_str())
            .with(keys::HOST, request.host.as_str())
            .with_opt(keys::PORT, request.explicit_port().map(i64::from))
            .with(keys::PATH, request.decoded_path())
            .with(keys::REQUEST_URI, request.uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_parts_are_extracted() {
        let request = Request::get("https://sulu.lo:8443/en/%C3%BCber?x=1").unwrap();
        let attributes = UrlRequestProcessor.process(&request, &RequestAttributes::new());

        assert_eq!(attributes.text(keys::SCHEME), Some("https"));
        assert_eq!(attributes.text(keys::HOST), Some("sulu.lo"));
        assert_eq!(attributes.int(keys::PORT), Some(8443));
        assert_eq!(attributes.text(keys::PATH), Some("/en/über"));
        assert_eq!(
            attributes.text(keys::REQUEST_URI),
            Some("https://sulu.lo:8443/en/%C3%BCber?x=1")
        );
        assert!(UrlRequestProcessor.validate(&attributes).is_ok());
    }
}
