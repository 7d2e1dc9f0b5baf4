pub mod client;
pub mod error;
pub mod frame;
pub mod invoke;

pub use client::{AgentRuntime, AgentRuntimeClient, AgentRuntimeConfig, FrameStream, InvokeRequest};
pub use error::{AgentError, ProviderErrorCode};
pub use frame::{ChunkPayload, Frame, FrameError};
pub use invoke::{collect_completion, invoke_and_collect};
