pub mod apis;
pub mod envelope;
pub mod error;
pub mod http;
pub mod session;

pub use error::{ApiJson, ErrorResponse};
pub use http::{router, start_server, ServerConfig, ServerState};
pub use session::{resolve_session_id, ClientFingerprint};
