//! SheetBase - employee directory on top of a spreadsheet endpoint
//!
//! - [`store`]: in-memory mirror of the remote rows, changed only after the
//!   endpoint confirmed a mutation
//! - [`filter`]: search view over the store
//! - [`generator`]: synthetic draft provider (Gemini)
//! - [`bulk`]: serial commit of a generated batch
//! - [`app`]: the directory controller that ties them together
//! - [`cli`]: command-line front end

pub mod app;
pub mod bulk;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod logger;
pub mod store;

pub use app::{Directory, RecordForm, View};
pub use bulk::BulkReport;
pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind, Notice};
pub use generator::{DraftProvider, GeminiProvider, GenerationError};
pub use store::{RecordStore, StoreError};

// Re-export client and model types for convenience
pub use sheet_client::{ClientConfig, ClientError, RemoteStore, SheetClient};
pub use shared::{Record, RecordDraft, RecordStatus};
