use super::common::*;
use crate::config::DEFAULT_GUARD_REDIRECT;
use crate::workflows::registration::gateway::{application_id_from, GatewayError};
use crate::workflows::registration::guard::{GuardDecision, RouteGuard};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn active_session_redirects_to_admin_area() {
    let session = Arc::new(FakeSession::new(admin_profile));
    let guard = RouteGuard::new(session.clone(), DEFAULT_GUARD_REDIRECT);

    assert_eq!(
        guard.check().await,
        GuardDecision::Redirect("/admin/data-pendaftar".to_string())
    );
    assert_eq!(session.call_count(), 1);
}

#[tokio::test]
async fn missing_session_renders_content() {
    let session = Arc::new(FakeSession::new(|| Err(GatewayError::Unauthorized)));
    let guard = RouteGuard::new(session.clone(), DEFAULT_GUARD_REDIRECT);

    assert_eq!(guard.check().await, GuardDecision::Render);
    assert_eq!(session.call_count(), 1);
}

#[tokio::test]
async fn profile_errors_fail_open() {
    let session = Arc::new(FakeSession::new(|| {
        Err(GatewayError::Transport("timed out".to_string()))
    }));
    let guard = RouteGuard::new(session, "/admin");

    assert_eq!(guard.check().await, GuardDecision::Render);
    assert_eq!(guard.redirect_to(), "/admin");
}

#[test]
fn decision_serializes_with_path() {
    let json = serde_json::to_value(GuardDecision::Redirect("/admin".to_string()))
        .expect("serializes");
    assert_eq!(json, json!({ "decision": "redirect", "path": "/admin" }));
    let json = serde_json::to_value(GuardDecision::Render).expect("serializes");
    assert_eq!(json, json!({ "decision": "render" }));
}

#[test]
fn application_id_is_read_from_body_or_envelope() {
    assert_eq!(
        application_id_from(&json!({ "id": "app-9" })).expect("top level").0,
        "app-9"
    );
    assert_eq!(
        application_id_from(&json!({ "data": { "id": 42 } }))
            .expect("envelope")
            .0,
        "42"
    );
    assert!(matches!(
        application_id_from(&json!({ "status": "ok" })),
        Err(GatewayError::Decode(_))
    ));
}
