//! Executes the core's `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the seam between the driver and real I/O, so driver tests
//! can script responses. `UreqTransport` runs the blocking ureq agent on
//! tokio's blocking pool and returns 4xx/5xx responses as data; only
//! failures that produce no response at all become `ApiError::Transport`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;
use user_list_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let path = req.path.as_str();
    let mut response = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(path).call(),
        (HttpMethod::Delete, _) => agent.delete(path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(path).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(path).send_empty(),
    }
    .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse::new(status, body))
}
