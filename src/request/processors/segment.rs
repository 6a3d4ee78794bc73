// Copyright 2025 Cowboy AI, LLC.

//! Segment selection

use super::RequestProcessor;
use crate::request::attributes::{keys, RequestAttributes};
use crate::request::incoming::Request;

/// Cookie carrying the segment chosen by the visitor
pub const SEGMENT_COOKIE: &str = "_ss";
/// Header a cache proxy sets with the segment
pub const SEGMENT_HEADER: &str = "X-Sulu-Segment";

/// Picks the segment of the webspace a request is served in
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentRequestProcessor;

impl RequestProcessor for SegmentRequestProcessor {
    fn name(&self) -> &'static str {
        "segment"
    }

    fn process(&self, request: &Request, attributes: &RequestAttributes) -> RequestAttributes {
        let Some(webspace) = attributes.webspace() else {
            return RequestAttributes::new();
        };

        let requested = request
            .header(SEGMENT_HEADER)
            .or_else(|| request.cookie(SEGMENT_COOKIE))
            .and_then(|key| webspace.segment(key));
        if let Some(segment) = requested {
            return RequestAttributes::new().with(keys::SEGMENT, segment.clone());
        }
        if attributes.segment().is_some() {
            return RequestAttributes::new();
        }
        RequestAttributes::new().with_opt(keys::SEGMENT, webspace.default_segment().cloned())
    }
}
