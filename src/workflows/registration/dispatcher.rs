use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{ApplicationId, ApplicationPayload};
use super::gateway::{ApplicationGateway, GatewayError};

pub const SUBMISSION_SUCCEEDED: &str = "Pendaftaran berhasil dikirim";
pub const SUBMISSION_FAILED: &str = "Pendaftaran gagal dikirim, silakan coba lagi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// User-facing notification raised after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Side channel for submission notices (toast, terminal, e-mail adapters).
pub trait Notifier: Send + Sync {
    fn publish(&self, notice: Notice) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notice transport unavailable: {0}")]
    Transport(String),
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn publish(&self, notice: Notice) -> Result<(), NotifyError> {
        (**self).publish(notice)
    }
}

/// Keeps every notice in memory, for terminals that render them after the fact and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice mutex poisoned").clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .expect("notice mutex poisoned")
            .last()
            .cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn publish(&self, notice: Notice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .map_err(|_| NotifyError::Transport("notice mutex poisoned".to_string()))?
            .push(notice);
        Ok(())
    }
}

/// Every failure collapses to "not successful"; the cause is kept for logs only.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission was not successful")]
    NotSuccessful(#[source] GatewayError),
}

impl SubmissionError {
    pub fn cause(&self) -> &GatewayError {
        match self {
            SubmissionError::NotSuccessful(cause) => cause,
        }
    }
}

/// Forwards a validated payload to the persistence collaborator exactly once.
pub struct SubmissionDispatcher<G, N> {
    gateway: Arc<G>,
    notifier: Arc<N>,
}

impl<G, N> SubmissionDispatcher<G, N>
where
    G: ApplicationGateway + 'static,
    N: Notifier + 'static,
{
    pub fn new(gateway: Arc<G>, notifier: Arc<N>) -> Self {
        Self { gateway, notifier }
    }

    /// One outbound request, no retry. The caller owns whatever state follows.
    pub async fn dispatch(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<ApplicationId, SubmissionError> {
        match self.gateway.submit_application(payload).await {
            Ok(application_id) => {
                info!(%application_id, "application submitted");
                self.notify(Notice::success(SUBMISSION_SUCCEEDED));
                Ok(application_id)
            }
            Err(cause) => {
                warn!(error = %cause, "application submission failed");
                self.notify(Notice::error(SUBMISSION_FAILED));
                Err(SubmissionError::NotSuccessful(cause))
            }
        }
    }

    fn notify(&self, notice: Notice) {
        if let Err(err) = self.notifier.publish(notice) {
            warn!(error = %err, "failed to publish submission notice");
        }
    }
}
