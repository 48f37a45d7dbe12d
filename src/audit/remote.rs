//! Client for a running audit endpoint
//!
//! Requires the `remote` feature (enabled by default):
//! ```toml
//! perfaudit = { version = "0.4", features = ["remote"] }
//! ```

use super::endpoint::ErrorBody;
use super::{AuditRequest, AuditResponse, MetricSource};
use crate::error::{AuditError, Result};
use std::time::Duration;

/// The stub sleeps before answering; leave generous headroom
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`MetricSource`] that POSTs the request to an audit endpoint
pub struct RemoteMetricSource {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl RemoteMetricSource {
    /// `endpoint` is the full URL, e.g. `http://127.0.0.1:3000/api/lighthouse`
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AuditError::Remote(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MetricSource for RemoteMetricSource {
    fn snapshot(&self, request: &AuditRequest) -> Result<AuditResponse> {
        log::debug!("POST {} for {}", self.endpoint, request.url);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| AuditError::Remote(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .map(|b| b.error)
                .unwrap_or_else(|_| "no error body".to_string());
            return Err(AuditError::Remote(format!("{}: {}", status, message)));
        }

        response
            .json::<AuditResponse>()
            .map_err(|e| AuditError::Remote(format!("invalid response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditConfig;

    #[test]
    fn test_unreachable_endpoint_is_remote_error() {
        // port 9 (discard) on localhost is closed in test environments
        let source = RemoteMetricSource::new("http://127.0.0.1:9/api/lighthouse").unwrap();
        let request = AuditRequest::new("https://example.com", AuditConfig::default());
        let err = source.snapshot(&request).unwrap_err();
        assert!(matches!(err, AuditError::Remote(_)));
    }

    #[test]
    fn test_endpoint_accessor() {
        let source = RemoteMetricSource::new("http://localhost:3000/api/lighthouse").unwrap();
        assert_eq!(source.endpoint(), "http://localhost:3000/api/lighthouse");
    }
}
