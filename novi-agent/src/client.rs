use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{Stream, StreamExt};
use serde::Serialize;
use tracing::info;

use crate::error::{AgentError, ProviderErrorCode};
use crate::frame::{Frame, FrameError};

/// Stream of frames produced by one invocation.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<Frame, AgentError>> + Send>>;

/// Configuration for the agent runtime client
#[derive(Clone, Debug)]
pub struct AgentRuntimeConfig {
    /// Base URL of the agent runtime API (e.g., "https://agent-runtime.internal")
    pub endpoint: String,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Per-read timeout on the response stream
    pub read_timeout: Duration,
}

impl AgentRuntimeConfig {
    /// Create a new config with the given endpoint and default timeouts.
    /// Legitimate agent responses can take minutes, so both timeouts default
    /// to 15 minutes and nothing is retried.
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            connect_timeout: Duration::from_secs(900),
            read_timeout: Duration::from_secs(900),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

/// One invocation of the external agent.
#[derive(Clone, Debug)]
pub struct InvokeRequest {
    pub agent_id: String,
    pub agent_alias_id: String,
    pub session_id: String,
    pub input_text: String,
    pub enable_trace: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvokeBody<'a> {
    session_id: &'a str,
    input_text: &'a str,
    enable_trace: bool,
}

/// Seam to the external agent runtime. One upstream call per invocation,
/// no automatic retry.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn invoke(&self, request: InvokeRequest) -> Result<FrameStream, AgentError>;
}

/// HTTP client for the agent runtime's streaming invocation API.
/// Built once at startup and shared; holds no per-request state.
pub struct AgentRuntimeClient {
    http: reqwest::Client,
    config: AgentRuntimeConfig,
}

impl AgentRuntimeClient {
    pub fn new(config: AgentRuntimeConfig) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl AgentRuntime for AgentRuntimeClient {
    async fn invoke(&self, request: InvokeRequest) -> Result<FrameStream, AgentError> {
        let url = format!(
            "{}/agents/{}/aliases/{}/invocations",
            self.config.endpoint.trim_end_matches('/'),
            request.agent_id,
            request.agent_alias_id,
        );

        info!(
            "Invoking agent {}/{} session={}",
            request.agent_id, request.agent_alias_id, request.session_id
        );

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/x-ndjson")
            .json(&InvokeBody {
                session_id: &request.session_id,
                input_text: &request.input_text,
                enable_trace: request.enable_trace,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // The runtime reports structured failures as {"code", "message"};
            // anything else is surfaced with a synthetic http-<status> code.
            return Err(match serde_json::from_str::<FrameError>(&body) {
                Ok(e) => AgentError::provider(&e.code, e.message),
                Err(_) => AgentError::Provider {
                    code: ProviderErrorCode::Other(format!("http-{}", status.as_u16())),
                    message: body,
                },
            });
        }

        // One JSON frame per line; chunk boundaries from the transport do
        // not align with line boundaries, so buffer across reads.
        let stream = async_stream::try_stream! {
            let mut body = response.bytes_stream();
            let mut buf: Vec<u8> = Vec::new();
            while let Some(next) = body.next().await {
                let data = next?;
                buf.extend_from_slice(&data);
                while let Some(pos) = buf.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = buf.drain(..=pos).collect();
                    let line = &line[..line.len() - 1];
                    if line.iter().all(|b| b.is_ascii_whitespace()) {
                        continue;
                    }
                    let frame: Frame = serde_json::from_slice(line)?;
                    yield frame;
                }
            }
            if !buf.iter().all(|b| b.is_ascii_whitespace()) {
                let frame: Frame = serde_json::from_slice(&buf)?;
                yield frame;
            }
        };

        Ok(Box::pin(stream))
    }
}
