// Copyright 2025 Cowboy AI, LLC.

//! Analysis timestamp

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::RequestProcessor;
use crate::request::attributes::{keys, RequestAttributes};
use crate::request::incoming::Request;

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Stamps the time the request was analyzed
#[derive(Clone)]
pub struct DateTimeRequestProcessor {
    clock: Clock,
}

impl fmt::Debug for DateTimeRequestProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeRequestProcessor").finish_non_exhaustive()
    }
}

impl Default for DateTimeRequestProcessor {
    fn default() -> Self {
        Self::new(Arc::new(Utc::now))
    }
}

impl DateTimeRequestProcessor {
    /// Create the processor with a custom clock
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }
}

impl RequestProcessor for DateTimeRequestProcessor {
    fn name(&self) -> &'static str {
        "date_time"
    }

    fn process(&self, _request: &Request, _attributes: &RequestAttributes) -> RequestAttributes {
        RequestAttributes::new().with(keys::DATE_TIME, (self.clock)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_uses_injected_clock() {
        let fixed = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let processor = DateTimeRequestProcessor::new(Arc::new(move || fixed));
        let request = Request::get("http://sulu.lo/").unwrap();

        let attributes = processor.process(&request, &RequestAttributes::new());
        assert_eq!(attributes.date_time(), Some(fixed));
    }
}
