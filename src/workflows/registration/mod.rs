//! Internship registration: schema validation, form lifecycle, and submission.
//!
//! The remote API is reached only through the [`ApplicationGateway`] and [`SessionGateway`]
//! traits so the controller and guard can be driven without a network.

pub mod controller;
pub mod dispatcher;
pub mod domain;
pub mod gateway;
pub mod guard;
pub mod schema;

#[cfg(test)]
mod tests;

pub use controller::{FieldBinding, FormController, SubmissionState, SubmitOutcome};
pub use dispatcher::{
    MemoryNotifier, Notice, NoticeLevel, Notifier, NotifyError, SubmissionDispatcher,
    SubmissionError,
};
pub use domain::{
    ApplicationId, ApplicationPayload, CollegeMajor, Division, Field, InternCategory,
    RegistrationInput, SessionProfile,
};
pub use gateway::{ApplicationGateway, GatewayError, HttpGateway, SessionGateway};
pub use guard::{GuardDecision, RouteGuard};
pub use schema::{RegistrationSchema, ValidationErrors};
