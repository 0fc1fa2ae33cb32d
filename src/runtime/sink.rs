use crate::config::{SubmissionConfig, SubmissionMode};
use crate::error::SubmitError;
use crate::runtime::payload::{LeadPayload, SubmitReceipt, SubmitResponse};
use std::time::Duration;

/// Where finished leads go. One call per accepted submit; implementations
/// must not retry on their own.
pub trait LeadSink {
    fn send(&self, payload: &LeadPayload) -> Result<SubmitReceipt, SubmitError>;
}

impl<F> LeadSink for F
where
    F: Fn(&LeadPayload) -> Result<SubmitReceipt, SubmitError>,
{
    fn send(&self, payload: &LeadPayload) -> Result<SubmitReceipt, SubmitError> {
        self(payload)
    }
}

pub fn sink_for(config: &SubmissionConfig) -> Result<Box<dyn LeadSink>, SubmitError> {
    match config.mode {
        SubmissionMode::Mock => Ok(Box::new(MockSink)),
        SubmissionMode::Http => Ok(Box::new(HttpSink::from_config(config)?)),
    }
}

pub struct HttpSink {
    agent: ureq::Agent,
    endpoint: String,
    method: String,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.into(),
            method: "POST".to_string(),
        }
    }

    pub fn from_config(config: &SubmissionConfig) -> Result<Self, SubmitError> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SubmitError::MissingEndpoint)?;

        Ok(Self::new(endpoint, Duration::from_secs(config.timeout_secs))
            .with_method(config.method.trim().to_ascii_uppercase()))
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }
}

impl LeadSink for HttpSink {
    fn send(&self, payload: &LeadPayload) -> Result<SubmitReceipt, SubmitError> {
        tracing::info!(endpoint = %self.endpoint, method = %self.method, "sending lead");

        let result = self
            .agent
            .request(&self.method, &self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(payload);

        match result {
            Ok(response) => {
                let status = response.status();
                let body: SubmitResponse = response
                    .into_json()
                    .map_err(|err| SubmitError::Decode(err.to_string()))?;
                tracing::info!(status, success = ?body.success, "lead endpoint responded");

                if body.is_success() {
                    Ok(SubmitReceipt {
                        message: body.message,
                    })
                } else {
                    Err(SubmitError::Rejected {
                        message: body
                            .message
                            .unwrap_or_else(|| "Gagal kirim ke server".to_string()),
                    })
                }
            }
            Err(ureq::Error::Status(code, response)) => {
                let message = response
                    .into_json::<SubmitResponse>()
                    .ok()
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| format!("HTTP {code}"));
                tracing::warn!(status = code, %message, "lead endpoint returned an error status");
                Err(SubmitError::Status { code, message })
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::warn!(error = %transport, "lead transport failed");
                Err(SubmitError::Transport(transport.to_string()))
            }
        }
    }
}

/// Preview sink: logs the payload and reports success without any I/O.
pub struct MockSink;

impl LeadSink for MockSink {
    fn send(&self, payload: &LeadPayload) -> Result<SubmitReceipt, SubmitError> {
        let body = serde_json::to_string(payload).map_err(|err| SubmitError::Decode(err.to_string()))?;
        tracing::info!(payload = %body, "mock submit");
        Ok(SubmitReceipt::default())
    }
}
