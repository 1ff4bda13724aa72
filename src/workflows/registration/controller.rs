use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::dispatcher::{Notifier, SubmissionDispatcher};
use super::domain::{ApplicationId, Field, RegistrationInput};
use super::gateway::ApplicationGateway;
use super::schema::{RegistrationSchema, ValidationErrors};

/// Lifecycle of one registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "application_id", rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded(ApplicationId),
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionState::Succeeded(_))
    }

    /// Whether the form accepts edits and a new submit.
    pub fn is_editable(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded(_) => "success",
        }
    }
}

/// What a call to [`FormController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Schema rejected the form; nothing left the process.
    Invalid(ValidationErrors),
    Submitted(ApplicationId),
    /// The remote call failed; the form is back to idle for a manual retry.
    NotSuccessful,
    /// A submission is in flight or already succeeded; call `reset` to start a new entry.
    Suppressed,
}

/// Current value of one input plus the message rendered beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding<'a> {
    pub field: Field,
    pub value: &'a str,
    pub error: Option<&'a str>,
}

/// Owns the form state and drives validation and submission.
pub struct FormController<G, N> {
    schema: RegistrationSchema,
    dispatcher: SubmissionDispatcher<G, N>,
    input: RegistrationInput,
    errors: ValidationErrors,
    state: SubmissionState,
}

impl<G, N> FormController<G, N>
where
    G: ApplicationGateway + 'static,
    N: Notifier + 'static,
{
    pub fn new(dispatcher: SubmissionDispatcher<G, N>) -> Self {
        Self {
            schema: RegistrationSchema::new(),
            dispatcher,
            input: RegistrationInput::default(),
            errors: ValidationErrors::new(),
            state: SubmissionState::Idle,
        }
    }

    pub fn with_gateway(gateway: Arc<G>, notifier: Arc<N>) -> Self {
        Self::new(SubmissionDispatcher::new(gateway, notifier))
    }

    pub fn field(&self, field: Field) -> FieldBinding<'_> {
        FieldBinding {
            field,
            value: self.input.get(field),
            error: self.errors.get(field),
        }
    }

    pub fn bindings(&self) -> Vec<FieldBinding<'_>> {
        Field::ALL.into_iter().map(|field| self.field(field)).collect()
    }

    /// Update one input. Its stale message is cleared; the rest wait for the next submit.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value);
        self.errors.remove(field);
    }

    /// Replace every input at once, e.g. from a saved draft.
    pub fn load(&mut self, input: RegistrationInput) {
        self.input = input;
        self.errors = ValidationErrors::new();
    }

    pub fn input(&self) -> &RegistrationInput {
        &self.input
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn is_success(&self) -> bool {
        self.state.is_success()
    }

    /// Validate the whole form and, when it passes, hand the payload to the dispatcher.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.state.is_editable() {
            debug!(state = self.state.label(), "submit suppressed");
            return SubmitOutcome::Suppressed;
        }

        let payload = match self.schema.validate(&self.input) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(fields = ?errors.fields(), "registration form rejected");
                self.errors = errors.clone();
                self.state = SubmissionState::Idle;
                return SubmitOutcome::Invalid(errors);
            }
        };

        self.errors = ValidationErrors::new();
        self.state = SubmissionState::Submitting;

        match self.dispatcher.dispatch(&payload).await {
            Ok(application_id) => {
                info!(%application_id, "registration completed");
                self.state = SubmissionState::Succeeded(application_id.clone());
                SubmitOutcome::Submitted(application_id)
            }
            Err(_) => {
                self.state = SubmissionState::Idle;
                SubmitOutcome::NotSuccessful
            }
        }
    }

    /// Clear every input and message so a new entry can start.
    pub fn reset(&mut self) {
        self.input = RegistrationInput::default();
        self.errors = ValidationErrors::new();
        self.state = SubmissionState::Idle;
    }
}
