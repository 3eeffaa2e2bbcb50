//! Application error types
//!
//! Every action on the directory returns [`AppError`]. Nothing is retried;
//! the caller decides what to show through [`Notice`].

use crate::generator::GenerationError;
use crate::store::StoreError;
use sheet_client::ClientError;
use shared::ValidationError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// No endpoint configured; remote operations are suppressed
    #[error("Remote endpoint is not configured (set GOOGLE_SHEET_SCRIPT_URL)")]
    SetupRequired,

    /// Draft rejected before any remote call
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Local store refused a confirmed mutation (logic error)
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No form is open")]
    NoForm,

    /// A bulk batch stopped at its first failure; earlier creates stay
    #[error("{source} ({created} of {total} records created before the failure)")]
    BulkAborted {
        created: usize,
        total: usize,
        source: Box<AppError>,
    },
}

/// Coarse failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or unparseable response
    Transport,
    /// Endpoint reported `status: "error"`
    Remote,
    Generation,
    Validation,
    Setup,
    /// Store invariant or form misuse
    Logic,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SetupRequired => ErrorKind::Setup,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Client(e) if e.is_remote() => ErrorKind::Remote,
            Self::Client(_) => ErrorKind::Transport,
            Self::Generation(_) => ErrorKind::Generation,
            Self::Store(_) | Self::NoForm => ErrorKind::Logic,
            Self::BulkAborted { source, .. } => source.kind(),
        }
    }
}

/// Result type for directory actions
pub type AppResult<T> = Result<T, AppError>;

/// How a failure is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Persistent, with a way back to configuration (list failures)
    Banner {
        title: String,
        message: String,
        hint: String,
    },
    /// Must be acknowledged (single-record and bulk failures)
    Blocking(String),
}

impl Notice {
    pub fn for_load(err: &AppError) -> Self {
        Self::Banner {
            title: "Connection Error".into(),
            message: err.to_string(),
            hint: "Check Configuration".into(),
        }
    }

    pub fn for_submit(err: &AppError) -> Self {
        Self::Blocking(format!("Operation failed: {err}"))
    }

    pub fn for_delete(err: &AppError) -> Self {
        Self::Blocking(format!("Delete failed: {err}"))
    }

    pub fn for_generate(err: &AppError) -> Self {
        Self::Blocking(format!("AI Generation failed: {err}"))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Banner { message, .. } => message,
            Self::Blocking(message) => message,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Banner {
                title,
                message,
                hint,
            } => write!(f, "{title}: {message} ({hint})"),
            Self::Blocking(message) => f.write_str(message),
        }
    }
}
