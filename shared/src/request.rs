//! Request payloads for the remote store endpoint
//!
//! Reads go out as `GET {endpoint}?action=read`. Every mutation is a POST
//! whose body is one of the [`SheetRequest`] variants serialized as JSON.

use crate::models::{Record, RecordDraft};
use serde::Serialize;

/// Query string for the read action
pub const READ_QUERY: [(&str, &str); 1] = [("action", "read")];

/// POST body, tagged by `action`
///
/// ```json
/// { "action": "create", "data": { "name": "...", ... } }
/// { "action": "update", "data": { "id": "...", "name": "...", ... } }
/// { "action": "delete", "id": "..." }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum SheetRequest<'a> {
    Create { data: &'a RecordDraft },
    Update { data: &'a Record },
    Delete { id: &'a str },
}

impl SheetRequest<'_> {
    /// Action name as the endpoint sees it
    pub fn action(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}
