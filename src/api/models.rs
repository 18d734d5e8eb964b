use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_STATUS: &str = "Active";
pub const DEFAULT_ROLE: &str = "Participant";
pub const DEFAULT_LAST_CONTACT: &str = "Jan 6, 2025";

/// Record ids are assigned by the backend and come back either as numbers or strings.
/// Anything else is kept verbatim so the record still loads.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
            RecordId::Other(v) => write!(f, "{v}"),
        }
    }
}

/// A participant or contact as stored by the backend.
///
/// Fields the client does not know about are kept in `extra` so a record
/// survives a fetch/post cycle unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ndis: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    #[serde(
        rename = "lastContact",
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_contact: Option<String>,
    #[serde(
        rename = "serviceType",
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    /// Fills in the display defaults the contacts screen relies on.
    /// Empty strings count as missing.
    pub fn normalized(mut self) -> Self {
        fill_blank(&mut self.status, DEFAULT_STATUS);
        fill_blank(&mut self.role, DEFAULT_ROLE);
        fill_blank(&mut self.last_contact, DEFAULT_LAST_CONTACT);
        self
    }

    pub fn status_or_empty(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }
}

fn fill_blank(slot: &mut Option<String>, default: &str) {
    if slot.as_deref().is_none_or(str::is_empty) {
        *slot = Some(default.to_string());
    }
}

/// The backend is schemaless: text fields may arrive as numbers, booleans or
/// null. They are read as their JSON text instead of failing the whole list.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(text(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(text(Value::deserialize(d)?))
    }
}

/// Body posted by the participants screen: the raw form values, nothing else.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub name: String,
    pub ndis: String,
    pub state: String,
    pub status: String,
}
