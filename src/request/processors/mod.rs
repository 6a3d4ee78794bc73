// Copyright 2025 Cowboy AI, LLC.

//! Request attribute processors.
//!
//! Each processor looks at the request and the attributes collected so
//! far and returns the attributes it contributes. Validation runs as a
//! separate pass once every processor has contributed.

mod admin;
mod date_time;
mod parameter;
mod portal_information;
mod segment;
mod system;
mod url;
mod website;

pub use admin::AdminRequestProcessor;
pub use date_time::{Clock, DateTimeRequestProcessor};
pub use parameter::ParameterRequestProcessor;
pub use portal_information::PortalInformationRequestProcessor;
pub use segment::{SegmentRequestProcessor, SEGMENT_COOKIE, SEGMENT_HEADER};
pub use system::{SystemContext, SystemRequestProcessor};
pub use url::UrlRequestProcessor;
pub use website::WebsiteRequestProcessor;

use super::attributes::RequestAttributes;
use super::incoming::Request;
use crate::errors::EngineResult;

/// One stage of the request analysis
#[cfg_attr(test, mockall::automock)]
pub trait RequestProcessor: Send + Sync {
    /// Stage name used in logs
    fn name(&self) -> &'static str;

    /// Attributes this stage contributes
    fn process(&self, request: &Request, attributes: &RequestAttributes) -> RequestAttributes;

    /// Check the final attributes
    fn validate(&self, _attributes: &RequestAttributes) -> EngineResult<()> {
        Ok(())
    }
}
