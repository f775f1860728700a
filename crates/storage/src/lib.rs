//! Persistence layer for the SSI service.
//!
//! Two layers live here:
//! - [`ServiceStorage`]: a byte-oriented key-value store partitioned into
//!   namespaces, with a sled-backed and an in-memory implementation.
//! - [`RecordStore`]: a typed wrapper that encodes domain records as JSON
//!   envelopes and maps them onto one namespace of a shared [`ServiceStorage`].

pub mod errors;
pub mod kv;
pub mod record;

pub use errors::{BackendError, ErrorCategory, Result, StorageError};
pub use kv::{MemoryStorage, ServiceStorage, SledStorage};
pub use record::{BulkRead, Record, RecordStore, SkippedEntry};
