mod handler;
mod types;

pub use handler::{handle_check, handle_create};
pub use types::{CheckPqrResponse, CreatePqrRequest, CreatePqrResponse};
