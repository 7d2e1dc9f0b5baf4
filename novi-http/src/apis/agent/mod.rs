mod handler;
mod types;

pub use handler::handle_converse;
pub use types::{ConverseRequest, ConverseResponse, CONFIRMATION_MESSAGE};
