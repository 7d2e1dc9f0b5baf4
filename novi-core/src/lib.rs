pub mod actions;
pub mod config;
pub mod pqr;

pub use config::NoviConfig;
pub use pqr::{MemoryPqrStore, NewPqr, PqrError, PqrRecord, PqrStatus, PqrStore, PqrStoreError};
