//! Remote response envelope
//!
//! Every endpoint response has the same outer shape:
//!
//! ```json
//! { "status": "success", "data": ..., "message": "..." }
//! { "status": "error", "message": "ID not found" }
//! ```
//!
//! The `status` field is the discriminator; the payload type depends on the
//! operation (`Vec<Record>` for read, `Record` for create/update, nothing for
//! delete).

use serde::{Deserialize, Serialize};

/// Response envelope, tagged by `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success {
        #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
        data: Option<T>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl<T> Envelope<T> {
    /// Split into the optional payload, or the endpoint's error message
    pub fn into_result(self) -> Result<Option<T>, Option<String>> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Error { message } => Err(message),
        }
    }
}
