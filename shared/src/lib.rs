//! Shared types for SheetBase
//!
//! Wire and data types used by both the remote store client and the
//! application core: records, drafts, the remote response envelope,
//! POST payloads and draft validation.

pub mod models;
pub mod request;
pub mod response;
pub mod validation;

// Re-exports
pub use models::{Record, RecordDraft, RecordStatus};
pub use request::SheetRequest;
pub use response::Envelope;
pub use serde::{Deserialize, Serialize};
pub use validation::ValidationError;
