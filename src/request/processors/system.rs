// Copyright 2025 Cowboy AI, LLC.

//! Security system of the request

use super::RequestProcessor;
use crate::request::attributes::{keys, RequestAttributes, SecuritySystem};
use crate::request::incoming::Request;

/// Context the analyzer runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemContext {
    /// Administration interface, always checked against the named system
    Admin(String),
    /// Public website, checked against the webspace's configured system
    Website,
}

/// Stores the security system as an attribute for the authorization layer
#[derive(Debug, Clone)]
pub struct SystemRequestProcessor {
    context: SystemContext,
}

impl SystemRequestProcessor {
    /// Create the processor
    pub fn new(context: SystemContext) -> Self {
        Self { context }
    }
}

impl RequestProcessor for SystemRequestProcessor {
    fn name(&self) -> &'static str {
        "system"
    }

    fn process(&self, _request: &Request, attributes: &RequestAttributes) -> RequestAttributes {
        let system = match &self.context {
            SystemContext::Admin(system) => Some(system.clone()),
            SystemContext::Website => attributes
                .webspace()
                .and_then(|webspace| webspace.security_system())
                .map(str::to_string),
        };
        RequestAttributes::new().with_opt(keys::SYSTEM, system.map(SecuritySystem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ADMIN_SECURITY_SYSTEM;
    use crate::test_support;
    use std::sync::Arc;

    fn system(processor: &SystemRequestProcessor, context: &RequestAttributes) -> Option<String> {
        let request = Request::get("http://sulu.lo/").unwrap();
        processor
            .process(&request, context)
            .system()
            .map(|system| system.to_string())
    }

    #[test]
    fn test_admin_system_is_unconditional() {
        let processor =
            SystemRequestProcessor::new(SystemContext::Admin(ADMIN_SECURITY_SYSTEM.to_string()));
        assert_eq!(system(&processor, &RequestAttributes::new()), Some("Sulu".to_string()));
    }

    #[test]
    fn test_website_uses_webspace_security() {
        let processor = SystemRequestProcessor::new(SystemContext::Website);
        let mut webspace = test_support::sulu_io();
        let secured = RequestAttributes::new().with(keys::WEBSPACE, Arc::new(webspace.clone()));
        assert_eq!(system(&processor, &secured), Some("sulu_io".to_string()));

        webspace.security = None;
        let open = RequestAttributes::new().with(keys::WEBSPACE, Arc::new(webspace));
        assert_eq!(system(&processor, &open), None);
        assert_eq!(system(&processor, &RequestAttributes::new()), None);
    }
}
