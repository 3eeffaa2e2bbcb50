//! Data models
//!
//! One row of the backing spreadsheet is one [`Record`]. A [`RecordDraft`]
//! is the same payload before the endpoint has minted an `id`.

pub mod record;

// Re-exports
pub use record::*;
