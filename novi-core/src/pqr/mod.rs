mod ops;
mod record;
mod store;

pub use ops::{check_pqr, create_pqr, PqrError};
pub use record::{NewPqr, PqrRecord, PqrStatus};
pub use store::{MemoryPqrStore, PqrStore, PqrStoreError};
