use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::domain::{ApplicationId, ApplicationPayload, SessionProfile};
use crate::config::ApiConfig;

/// Failure talking to the remote registration or session service.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("session is not authorized")]
    Unauthorized,
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Persistence collaborator receiving validated applications.
#[async_trait]
pub trait ApplicationGateway: Send + Sync {
    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<ApplicationId, GatewayError>;
}

/// Session collaborator consulted by the route guard.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    async fn fetch_profile(&self) -> Result<SessionProfile, GatewayError>;
}

#[async_trait]
impl<T: ApplicationGateway + ?Sized> ApplicationGateway for Arc<T> {
    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<ApplicationId, GatewayError> {
        (**self).submit_application(payload).await
    }
}

#[async_trait]
impl<T: SessionGateway + ?Sized> SessionGateway for Arc<T> {
    async fn fetch_profile(&self) -> Result<SessionProfile, GatewayError> {
        (**self).fetch_profile().await
    }
}

/// `reqwest` client for the registration API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: ApiConfig,
}

impl HttpGateway {
    pub fn new(config: ApiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, GatewayError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

#[async_trait]
impl ApplicationGateway for HttpGateway {
    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<ApplicationId, GatewayError> {
        let url = self.config.endpoint("applications");
        debug!(%url, "posting application");
        let body = self.send(self.client.post(url).json(payload)).await?;
        application_id_from(&body)
    }
}

#[async_trait]
impl SessionGateway for HttpGateway {
    async fn fetch_profile(&self) -> Result<SessionProfile, GatewayError> {
        let url = self.config.endpoint("profile");
        debug!(%url, "fetching session profile");
        let body = self.send(self.client.get(url)).await?;
        let profile = match body.get("data") {
            Some(data) if data.is_object() => data.clone(),
            _ => body,
        };
        serde_json::from_value(profile).map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

async fn rejection(response: Response) -> GatewayError {
    let status = response.status();
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return GatewayError::Unauthorized;
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| {
            ["message", "error"]
                .iter()
                .find_map(|key| body.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        });

    GatewayError::Rejected {
        status: status.as_u16(),
        message,
    }
}

/// Reads `id` from the top level or from a `data` envelope; numeric ids are accepted.
pub(crate) fn application_id_from(body: &Value) -> Result<ApplicationId, GatewayError> {
    let id = body
        .get("id")
        .or_else(|| body.get("data").and_then(|data| data.get("id")));

    match id {
        Some(Value::String(id)) if !id.is_empty() => Ok(ApplicationId(id.clone())),
        Some(Value::Number(id)) => Ok(ApplicationId(id.to_string())),
        _ => Err(GatewayError::Decode(
            "response carries no application id".to_string(),
        )),
    }
}
