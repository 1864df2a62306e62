//! Background Executor
//!
//! Runs the HTTP POST off the UI thread and hands the outcome back over the
//! UI channel. A task runs to completion or failure exactly once: no retry,
//! no timeout beyond the HTTP client's defaults, no cancellation. Failures
//! never propagate out of the task; they are logged and surfaced as a
//! [`UiMessage::Failure`].

use crate::audit;
use crate::editor::Region;
use crate::error::{RedraftError, RedraftResult};
use crate::providers::{ApiRequest, ProviderAdapter};
use crate::ui::UiMessage;
use async_trait::async_trait;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Trait for the outbound HTTP seam
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST the request and return the raw response body
    async fn post(&self, request: &ApiRequest) -> RedraftResult<String>;
}

/// Real transport backed by reqwest
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &ApiRequest) -> RedraftResult<String> {
        let mut builder = self.client.post(&request.url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RedraftError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RedraftError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(RedraftError::Transport(format!("HTTP {status}: {body}")));
        }
        Ok(body)
    }
}

/// One outgoing request together with the region it will splice back into
#[derive(Debug)]
pub struct Job {
    pub request: ApiRequest,
    pub region: Region,
    /// Document revision captured at dispatch time
    pub revision: u64,
}

/// Task body spawned once per non-empty region.
///
/// Sends exactly one `ApplyResult` or `Failure` message back to the UI loop.
pub async fn run(
    job: Job,
    adapter: Arc<dyn ProviderAdapter>,
    transport: Arc<dyn Transport>,
    ui_tx: Sender<UiMessage>,
) {
    debug!(
        "request for region {}..{} via {}",
        job.region.start,
        job.region.end,
        adapter.kind()
    );

    match execute(&job, adapter.as_ref(), transport.as_ref()).await {
        Ok(text) => {
            let _ = ui_tx.send(UiMessage::ApplyResult {
                region: job.region,
                revision: job.revision,
                text,
            });
        }
        Err(err) => {
            let message = err.to_string();
            error!("{message}");
            if let Err(log_err) = audit::log_failure(err.classification(), &message) {
                warn!("Could not write failure log: {log_err}");
            }
            let _ = ui_tx.send(UiMessage::Failure {
                classification: err.classification(),
                message,
            });
        }
    }
}

async fn execute(
    job: &Job,
    adapter: &dyn ProviderAdapter,
    transport: &dyn Transport,
) -> RedraftResult<String> {
    let body = transport.post(&job.request).await?;
    adapter.extract_text(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{create_adapter, ProviderKind};
    use std::sync::mpsc;

    struct CannedTransport(String);

    #[async_trait]
    impl Transport for CannedTransport {
        async fn post(&self, _request: &ApiRequest) -> RedraftResult<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn post(&self, _request: &ApiRequest) -> RedraftResult<String> {
            Err(RedraftError::Transport("connection refused".into()))
        }
    }

    fn job() -> Job {
        Job {
            request: ApiRequest {
                url: "https://example.invalid/v1/chat/completions".to_string(),
                headers: vec![],
                body: serde_json::json!({}),
            },
            region: Region::new(0, 5),
            revision: 3,
        }
    }

    #[test]
    fn test_success_sends_apply_result() {
        let (tx, rx) = mpsc::channel();
        let adapter = create_adapter(ProviderKind::OpenAi);
        let transport = Arc::new(CannedTransport(
            r#"{"choices":[{"message":{"content":"X"}}]}"#.to_string(),
        ));

        tokio_test::block_on(run(job(), adapter, transport, tx));

        match rx.recv().unwrap() {
            UiMessage::ApplyResult {
                region,
                revision,
                text,
            } => {
                assert_eq!(region, Region::new(0, 5));
                assert_eq!(revision, 3);
                assert_eq!(text, "X");
            }
            other => panic!("expected ApplyResult, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_failure_sends_failure_message() {
        let (tx, rx) = mpsc::channel();
        let adapter = create_adapter(ProviderKind::OpenAi);

        tokio_test::block_on(run(job(), adapter, Arc::new(FailingTransport), tx));

        match rx.recv().unwrap() {
            UiMessage::Failure {
                classification,
                message,
            } => {
                assert_eq!(classification, "transport");
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected Failure, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_body_is_a_response_shape_failure() {
        let (tx, rx) = mpsc::channel();
        let adapter = create_adapter(ProviderKind::Anthropic);
        let transport = Arc::new(CannedTransport(r#"{"unexpected":true}"#.to_string()));

        tokio_test::block_on(run(job(), adapter, transport, tx));

        match rx.recv().unwrap() {
            UiMessage::Failure { classification, .. } => {
                assert_eq!(classification, "response-shape");
            }
            other => panic!("expected Failure, got {other:?}"),
        }
    }
}
