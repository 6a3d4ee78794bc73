// Copyright 2025 Cowboy AI, LLC.

//! Processor pipelines for website and admin requests

use std::sync::Arc;

use tracing::{debug, warn};

use super::attributes::RequestAttributes;
use super::incoming::Request;
use super::processors::{
    AdminRequestProcessor, DateTimeRequestProcessor, ParameterRequestProcessor,
    PortalInformationRequestProcessor, RequestProcessor, SegmentRequestProcessor, SystemContext,
    SystemRequestProcessor, UrlRequestProcessor, WebsiteRequestProcessor,
};
use crate::config::EngineSettings;
use crate::errors::EngineResult;
use crate::webspace::WebspaceManager;

/// Runs processors in order and validates the merged result
pub struct RequestAnalyzer {
    processors: Vec<Arc<dyn RequestProcessor>>,
}

impl RequestAnalyzer {
    /// Pipeline of the given processors
    pub fn new(processors: Vec<Arc<dyn RequestProcessor>>) -> Self {
        Self { processors }
    }

    /// Url, Parameter, Website, PortalInformation, Segment, System, DateTime
    pub fn website(manager: Arc<dyn WebspaceManager>, settings: &EngineSettings) -> Self {
        Self::new(vec![
            Arc::new(UrlRequestProcessor),
            Arc::new(ParameterRequestProcessor::new(
                Arc::clone(&manager),
                settings.environment.as_str(),
            )),
            Arc::new(WebsiteRequestProcessor::new(manager, settings.environment.as_str())),
            Arc::new(PortalInformationRequestProcessor),
            Arc::new(SegmentRequestProcessor),
            Arc::new(SystemRequestProcessor::new(SystemContext::Website)),
            Arc::new(DateTimeRequestProcessor::default()),
        ])
    }

    /// Url, Admin, System, DateTime
    pub fn admin(manager: Arc<dyn WebspaceManager>, settings: &EngineSettings) -> Self {
        Self::new(vec![
            Arc::new(UrlRequestProcessor),
            Arc::new(AdminRequestProcessor::new(manager)),
            Arc::new(SystemRequestProcessor::new(SystemContext::Admin(
                settings.admin_system.clone(),
            ))),
            Arc::new(DateTimeRequestProcessor::default()),
        ])
    }

    /// Replace the processor registered under the same name
    pub fn with_processor(mut self, processor: Arc<dyn RequestProcessor>) -> Self {
        match self
            .processors
            .iter()
            .position(|existing| existing.name() == processor.name())
        {
            Some(idx) => self.processors[idx] = processor,
            None => self.processors.push(processor),
        }
        self
    }

    /// Names of the processors in pipeline order
    pub fn processor_names(&self) -> Vec<&'static str> {
        self.processors.iter().map(|processor| processor.name()).collect()
    }

    /// Fold every processor's contribution into one bag
    pub fn process(&self, request: &Request) -> RequestAttributes {
        self.processors
            .iter()
            .fold(RequestAttributes::new(), |attributes, processor| {
                let contribution = processor.process(request, &attributes);
                debug!(
                    "Processor {} contributed {} attributes",
                    processor.name(),
                    contribution.len()
                );
                attributes.merge(&contribution)
            })
    }

    /// Run every validation in order, stopping at the first failure
    pub fn validate(&self, attributes: &RequestAttributes) -> EngineResult<()> {
        for processor in &self.processors {
            if let Err(err) = processor.validate(attributes) {
                warn!("Processor {} rejected the request: {}", processor.name(), err);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Process and validate a request
    pub fn analyze(&self, request: &Request) -> EngineResult<RequestAttributes> {
        let attributes = self.process(request);
        self.validate(&attributes)?;
        Ok(attributes)
    }
}
