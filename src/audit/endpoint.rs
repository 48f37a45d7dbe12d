//! Transport-independent handling of the stub audit endpoint.
//!
//! The HTTP server only adds routing and the artificial delay; status codes and
//! bodies are decided here so they can be tested without a socket.

use super::{AuditRequest, MetricSource};
use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Route of the audit endpoint
pub const AUDIT_PATH: &str = "/api/lighthouse";

/// Generic message returned for any failed audit; details only go to the log
pub const FAILURE_MESSAGE: &str = "Failed to run Lighthouse audit";

/// Error body returned with a non-2xx status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Status code and JSON body for one endpoint call
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl EndpointResponse {
    fn failure() -> Self {
        Self {
            status: 500,
            body: json!({ "error": FAILURE_MESSAGE }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn parse_request(body: &[u8]) -> Result<AuditRequest> {
    serde_json::from_slice(body).map_err(|e| AuditError::Parse(e.to_string()))
}

/// Static description served on GET
pub fn capabilities() -> serde_json::Value {
    json!({
        "message": "Lighthouse API endpoint",
        "endpoints": {
            "POST": format!("{} - Run Lighthouse audit", AUDIT_PATH),
        },
    })
}

/// Handle a POST body: parse, snapshot, serialize.
pub fn handle_audit(source: &dyn MetricSource, body: &[u8]) -> EndpointResponse {
    let request = match parse_request(body) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("rejecting audit request: {}", e);
            return EndpointResponse::failure();
        }
    };

    match source.snapshot(&request) {
        Ok(response) => match serde_json::to_value(&response) {
            Ok(body) => {
                log::info!("audit completed for {}", request.url);
                EndpointResponse { status: 200, body }
            }
            Err(e) => {
                log::error!("failed to serialize audit response: {}", e);
                EndpointResponse::failure()
            }
        },
        Err(e) => {
            log::error!("audit for {} failed: {}", request.url, e);
            EndpointResponse::failure()
        }
    }
}
