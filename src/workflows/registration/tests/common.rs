use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::workflows::registration::dispatcher::{
    MemoryNotifier, Notice, Notifier, NotifyError, SubmissionDispatcher,
};
use crate::workflows::registration::domain::{
    ApplicationId, ApplicationPayload, RegistrationInput, SessionProfile,
};
use crate::workflows::registration::gateway::{ApplicationGateway, GatewayError, SessionGateway};
use crate::workflows::registration::FormController;

pub(super) fn valid_input() -> RegistrationInput {
    RegistrationInput {
        full_name: "Siti Rahmawati".to_string(),
        university: "Universitas Sam Ratulangi".to_string(),
        email: "siti.rahma@example.com".to_string(),
        phone: "081234567890".to_string(),
        intern_category: "Magang KRS".to_string(),
        krs_remaining: "20".to_string(),
        semester: "6".to_string(),
        division_request: "Moneter".to_string(),
        ipk: "3.65".to_string(),
        college_major: "Ekonomi".to_string(),
        start_month: "2024-01-01".to_string(),
        end_month: "2024-07-01".to_string(),
        google_drive_link: "https://drive.google.com/drive/folders/berkas-siti".to_string(),
    }
}

type Responder = Box<dyn Fn() -> Result<ApplicationId, GatewayError> + Send + Sync>;

/// Stands in for the registration API; every call is recorded.
pub(super) struct FakeGateway {
    respond: Responder,
    pub(super) calls: Mutex<Vec<ApplicationPayload>>,
}

impl FakeGateway {
    pub(super) fn accepting(id: &str) -> Self {
        let id = id.to_string();
        Self::responding(move || Ok(ApplicationId(id.clone())))
    }

    pub(super) fn rejecting(status: u16, message: &str) -> Self {
        let message = message.to_string();
        Self::responding(move || {
            Err(GatewayError::Rejected {
                status,
                message: message.clone(),
            })
        })
    }

    pub(super) fn offline() -> Self {
        Self::responding(|| Err(GatewayError::Transport("connection refused".to_string())))
    }

    fn responding(
        respond: impl Fn() -> Result<ApplicationId, GatewayError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.lock().expect("calls mutex poisoned").len()
    }

    pub(super) fn last_payload(&self) -> Option<ApplicationPayload> {
        self.calls.lock().expect("calls mutex poisoned").last().cloned()
    }
}

#[async_trait]
impl ApplicationGateway for FakeGateway {
    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<ApplicationId, GatewayError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(payload.clone());
        (self.respond)()
    }
}

pub(super) struct FakeSession {
    result: fn() -> Result<SessionProfile, GatewayError>,
    pub(super) calls: Mutex<usize>,
}

impl FakeSession {
    pub(super) fn new(result: fn() -> Result<SessionProfile, GatewayError>) -> Self {
        Self {
            result,
            calls: Mutex::new(0),
        }
    }

    pub(super) fn call_count(&self) -> usize {
        *self.calls.lock().expect("calls mutex poisoned")
    }
}

#[async_trait]
impl SessionGateway for FakeSession {
    async fn fetch_profile(&self) -> Result<SessionProfile, GatewayError> {
        *self.calls.lock().expect("calls mutex poisoned") += 1;
        (self.result)()
    }
}

pub(super) fn admin_profile() -> Result<SessionProfile, GatewayError> {
    Ok(SessionProfile {
        id: "adm-1".to_string(),
        name: "Admin Magang".to_string(),
        role: Some("admin".to_string()),
    })
}

pub(super) struct BrokenNotifier;

impl Notifier for BrokenNotifier {
    fn publish(&self, _notice: Notice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("toast channel closed".to_string()))
    }
}

pub(super) fn build_controller(
    gateway: FakeGateway,
) -> (
    FormController<FakeGateway, MemoryNotifier>,
    Arc<FakeGateway>,
    Arc<MemoryNotifier>,
) {
    let gateway = Arc::new(gateway);
    let notifier = Arc::new(MemoryNotifier::default());
    let controller = FormController::new(SubmissionDispatcher::new(
        gateway.clone(),
        notifier.clone(),
    ));
    (controller, gateway, notifier)
}
