use futures::StreamExt;
use tracing::warn;

use crate::client::{AgentRuntime, FrameStream, InvokeRequest};
use crate::error::AgentError;
use crate::frame::Frame;

/// Drain a frame stream into the final response text.
///
/// Chunks are decoded as UTF-8 with replacement and concatenated in arrival
/// order. An in-stream error marker is logged and skipped; the stream keeps
/// draining. A terminal stream failure discards the whole accumulated buffer
/// and propagates.
pub async fn collect_completion(mut stream: FrameStream) -> Result<String, AgentError> {
    let mut text = String::new();

    while let Some(frame) = stream.next().await {
        match frame? {
            Frame::Chunk(payload) => {
                text.push_str(&String::from_utf8_lossy(&payload.data()));
            }
            Frame::Error(marker) => {
                warn!(
                    "In-stream error from agent runtime ({}): {}",
                    marker.code, marker.message
                );
            }
        }
    }

    Ok(text)
}

/// Invoke the agent once and aggregate the streamed response.
pub async fn invoke_and_collect(
    runtime: &dyn AgentRuntime,
    request: InvokeRequest,
) -> Result<String, AgentError> {
    let stream = runtime.invoke(request).await?;
    collect_completion(stream).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use crate::frame::FrameError;

    fn scripted(frames: Vec<Result<Frame, AgentError>>) -> FrameStream {
        Box::pin(futures::stream::iter(frames))
    }

    #[tokio::test]
    async fn chunks_aggregate_in_arrival_order() {
        let stream = scripted(vec![
            Ok(Frame::chunk("Hola")),
            Ok(Frame::chunk(" ")),
            Ok(Frame::chunk("Novi")),
        ]);
        assert_eq!(collect_completion(stream).await.unwrap(), "Hola Novi");
    }

    #[tokio::test]
    async fn in_stream_error_marker_is_drained_not_fatal() {
        let stream = scripted(vec![
            Ok(Frame::chunk("Hola")),
            Ok(Frame::Error(FrameError {
                code: "internal".to_string(),
                message: "hiccup".to_string(),
            })),
            Ok(Frame::chunk(" Novi")),
        ]);
        assert_eq!(collect_completion(stream).await.unwrap(), "Hola Novi");
    }

    #[tokio::test]
    async fn terminal_failure_discards_partial_output() {
        let stream = scripted(vec![
            Ok(Frame::chunk("partial")),
            Err(AgentError::Provider {
                code: ProviderErrorCode::Throttled,
                message: "too many requests".to_string(),
            }),
        ]);
        let err = collect_completion(stream).await.unwrap_err();
        match err {
            AgentError::Provider { code, .. } => assert_eq!(code, ProviderErrorCode::Throttled),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_fatal() {
        let stream = scripted(vec![Ok(Frame::Chunk(crate::frame::ChunkPayload::new(
            &[0x48, 0x6f, 0x6c, 0x61, 0xff],
        )))]);
        let text = collect_completion(stream).await.unwrap();
        assert!(text.starts_with("Hola"));
        assert!(text.contains('\u{FFFD}'));
    }
}
