use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::gateway::{GatewayError, SessionGateway};

/// Result of checking the session before the public pages render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "path", rename_all = "snake_case")]
pub enum GuardDecision {
    /// A session exists; send the visitor to the admin area instead.
    Redirect(String),
    Render,
}

/// Keeps signed-in staff away from the public registration pages.
pub struct RouteGuard<S> {
    session: Arc<S>,
    redirect_to: String,
}

impl<S> RouteGuard<S>
where
    S: SessionGateway + 'static,
{
    pub fn new(session: Arc<S>, redirect_to: impl Into<String>) -> Self {
        Self {
            session,
            redirect_to: redirect_to.into(),
        }
    }

    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    /// Fetch the profile once. Any failure renders the wrapped content.
    pub async fn check(&self) -> GuardDecision {
        match self.session.fetch_profile().await {
            Ok(profile) => {
                info!(
                    profile_id = %profile.id,
                    target = %self.redirect_to,
                    "active session, redirecting"
                );
                GuardDecision::Redirect(self.redirect_to.clone())
            }
            Err(GatewayError::Unauthorized) => {
                debug!("no active session");
                GuardDecision::Render
            }
            Err(err) => {
                debug!(error = %err, "profile check failed, rendering public content");
                GuardDecision::Render
            }
        }
    }
}
