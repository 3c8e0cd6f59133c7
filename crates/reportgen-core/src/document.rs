use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The caller-supplied payload a report is rendered from.
///
/// The pipeline never inspects the shape beyond identifier extraction; the
/// whole value is handed to the HTML renderer as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputDocument(Value);

impl InputDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A `null` event carries no document at all.
    pub fn is_absent(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Look up a nested field by JSON pointer (e.g. `/report/number`).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for InputDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
