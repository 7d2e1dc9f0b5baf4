use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One unit of a streamed agent response.
///
/// The runtime answers an invocation with newline-delimited JSON, one frame
/// per line. A frame is either a chunk of output bytes or an in-stream error
/// marker; the discriminant is the outer key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Frame {
    #[serde(rename = "chunk")]
    Chunk(ChunkPayload),
    #[serde(rename = "error")]
    Error(FrameError),
}

/// Data frame payload. Bytes travel base64-encoded on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPayload {
    pub bytes: String,
}

impl ChunkPayload {
    pub fn new(data: &[u8]) -> Self {
        Self {
            bytes: BASE64.encode(data),
        }
    }

    /// Decode the base64 payload. Undecodable payloads yield empty bytes
    /// rather than failing the whole stream.
    pub fn data(&self) -> Bytes {
        BASE64
            .decode(&self.bytes)
            .map(Bytes::from)
            .unwrap_or_default()
    }
}

/// In-stream error marker. Does not terminate the stream by itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameError {
    pub code: String,
    pub message: String,
}

impl Frame {
    /// Convenience constructor for a data frame from raw text.
    pub fn chunk(text: &str) -> Self {
        Frame::Chunk(ChunkPayload::new(text.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_frame_round_trips_payload_bytes() {
        let frame = Frame::chunk("Hola");
        match &frame {
            Frame::Chunk(payload) => assert_eq!(payload.data().as_ref(), b"Hola"),
            Frame::Error(_) => panic!("expected chunk"),
        }
    }

    #[test]
    fn frames_are_externally_tagged() {
        let chunk: Frame = serde_json::from_str(r#"{"chunk":{"bytes":"SG9sYQ=="}}"#).unwrap();
        assert!(matches!(chunk, Frame::Chunk(_)));

        let error: Frame =
            serde_json::from_str(r#"{"error":{"code":"throttled","message":"slow down"}}"#)
                .unwrap();
        match error {
            Frame::Error(e) => {
                assert_eq!(e.code, "throttled");
                assert_eq!(e.message, "slow down");
            }
            Frame::Chunk(_) => panic!("expected error"),
        }
    }

    #[test]
    fn invalid_base64_degrades_to_empty_bytes() {
        let payload = ChunkPayload {
            bytes: "not base64!!".to_string(),
        };
        assert!(payload.data().is_empty());
    }
}
