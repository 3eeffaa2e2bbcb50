//! Employee record model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employment status
///
/// Wire form is the spreadsheet cell text: `Active`, `Inactive`, `On Leave`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl RecordStatus {
    /// All statuses in display order
    pub const ALL: [RecordStatus; 3] = [Self::Active, Self::Inactive, Self::OnLeave];

    /// Wire / display text
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected Active, Inactive or On Leave)")]
pub struct ParseStatusError(pub String);

impl FromStr for RecordStatus {
    type Err = ParseStatusError;

    /// Case-insensitive; `On Leave`, `on-leave`, `on_leave` and `onleave` all
    /// parse to [`RecordStatus::OnLeave`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "onleave" => Ok(Self::OnLeave),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Record payload before the endpoint has assigned an `id`
///
/// Used as the create input and as form state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordDraft {
    #[serde(default, deserialize_with = "cell_text")]
    pub name: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub role: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub department: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub email: String,
    #[serde(default, deserialize_with = "status_cell")]
    pub status: RecordStatus,
}

impl RecordDraft {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        department: impl Into<String>,
        email: impl Into<String>,
        status: RecordStatus,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            department: department.into(),
            email: email.into(),
            status,
        }
    }

    /// Attach a server-minted id
    pub fn into_record(self, id: impl Into<String>) -> Record {
        Record {
            id: id.into(),
            name: self.name,
            role: self.role,
            department: self.department,
            email: self.email,
            status: self.status,
        }
    }
}

/// A persisted employee record (one spreadsheet row)
///
/// `id` is minted by the endpoint on create and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "cell_text")]
    pub id: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub name: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub role: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub department: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub email: String,
    #[serde(default, deserialize_with = "status_cell")]
    pub status: RecordStatus,
}

impl Record {
    /// Copy of the editable fields
    pub fn to_draft(&self) -> RecordDraft {
        RecordDraft {
            name: self.name.clone(),
            role: self.role.clone(),
            department: self.department.clone(),
            email: self.email.clone(),
            status: self.status,
        }
    }

}

/// Spreadsheet cells come back as raw values: a name typed as digits arrives
/// as a JSON number, an empty cell as `""` or `null`.
fn cell_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a text cell, found {other}"
        ))),
    }
}

/// Status cells are typed by hand: any spelling [`RecordStatus::from_str`]
/// accepts is taken, and a blank cell means the default.
fn status_cell<'de, D>(deserializer: D) -> Result<RecordStatus, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let text = cell_text(deserializer)?;
    if text.trim().is_empty() {
        return Ok(RecordStatus::default());
    }
    text.parse().map_err(D::Error::custom)
}
