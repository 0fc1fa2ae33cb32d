use crate::error::{SubmitBlocked, SubmitError};
use crate::runtime::payload::{LeadPayload, SubmitReceipt};
use crate::runtime::sink::LeadSink;
use crate::state::store::FormStore;
use crate::state::validation;
use chrono::Utc;
use serde::Serialize;

/// A failed attempt drops straight back to `Idle` with a failure notice, so
/// there is no persisted failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Failure,
            message: message.into(),
        }
    }
}

impl FormStore {
    pub fn can_submit(&self) -> bool {
        self.status == SubmissionStatus::Idle
    }

    /// Gates the submit on a full re-validation and freezes the payload.
    /// On success the store is `Submitting` until [`FormStore::finish_submit`].
    pub fn begin_submit(&mut self) -> Result<LeadPayload, SubmitBlocked> {
        match self.status {
            SubmissionStatus::Submitting => return Err(SubmitBlocked::Busy),
            SubmissionStatus::Succeeded => return Err(SubmitBlocked::AlreadySubmitted),
            SubmissionStatus::Idle => {}
        }

        self.errors = validation::validate_all(&self.form, &self.config);
        if !self.errors.is_empty() {
            tracing::debug!(errors = self.errors.len(), "submit blocked by validation");
            return Err(SubmitBlocked::Invalid(self.errors.clone()));
        }

        let mut payload = LeadPayload::from_form(&self.form);
        if self.config.submission.include_attribution {
            payload = payload.with_attribution(&self.form, &self.tags, Utc::now());
        }

        self.notice = None;
        self.status = SubmissionStatus::Submitting;
        tracing::info!(
            campaign = %self.tags.campaign,
            source = %self.tags.source,
            minat = %payload.minat_bidang,
            "submitting lead"
        );
        Ok(payload)
    }

    pub fn finish_submit(&mut self, outcome: Result<SubmitReceipt, SubmitError>) {
        if self.status != SubmissionStatus::Submitting {
            tracing::warn!(status = ?self.status, "submit outcome without a submission in flight");
            return;
        }

        match outcome {
            Ok(receipt) => {
                let message = receipt
                    .message
                    .filter(|msg| !msg.trim().is_empty())
                    .unwrap_or_else(|| self.config.messages.submit_success.clone());
                self.status = SubmissionStatus::Succeeded;
                self.notice = Some(Notice::success(message));
                tracing::info!("lead submitted");
            }
            Err(err) => {
                self.status = SubmissionStatus::Idle;
                self.notice = Some(Notice::failure(format!(
                    "{} ({err})",
                    self.config.messages.submit_failed
                )));
                tracing::warn!(error = %err, "lead submit failed");
            }
        }
    }

    /// One validated attempt against `sink`. Returns the resulting status.
    pub fn submit_with(&mut self, sink: &dyn LeadSink) -> Result<SubmissionStatus, SubmitBlocked> {
        let payload = self.begin_submit()?;
        let outcome = sink.send(&payload);
        self.finish_submit(outcome);
        Ok(self.status)
    }
}
