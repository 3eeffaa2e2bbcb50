//! Sheet Client - HTTP client for the spreadsheet-backed record endpoint
//!
//! Wraps the endpoint's four actions (read, create, update, delete) and turns
//! its response envelope into typed results.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{RemoteStore, SheetClient};

// Re-export shared types for convenience
pub use shared::{Envelope, Record, RecordDraft, RecordStatus};
