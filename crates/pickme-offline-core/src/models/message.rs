use serde_json::Value;

/// Message type that asks a waiting worker to take over immediately.
pub const SKIP_WAITING: &str = "SKIP_WAITING";

/// A structured message posted by a controlled page.
///
/// Pages send `{"type": "..."}` objects. Only `SKIP_WAITING` is acted on;
/// anything else, including payloads with no `type`, is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    SkipWaiting,
    Other(String),
    Untyped,
}

impl WorkerMessage {
    pub fn from_value(value: &Value) -> Self {
        match value.get("type").and_then(Value::as_str) {
            Some(SKIP_WAITING) => Self::SkipWaiting,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Untyped,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&raw))
    }
}
