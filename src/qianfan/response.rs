use serde::Deserialize;
use serde_json::Value;

use crate::core::LlmError;

/// Raw response returned by the Qianfan API.
///
/// The payload is kept opaque: accessors pull out the fields the adapter
/// cares about and leave everything else untouched for history inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct QianfanResponse {
    pub body: Value,
}

impl QianfanResponse {
    pub(crate) fn new(body: Value) -> Self {
        Self { body }
    }

    /// The completion text at `body.result`.
    pub fn result(&self) -> Result<&str, LlmError> {
        self.body
            .get("result")
            .and_then(Value::as_str)
            .ok_or(LlmError::MissingField("result"))
    }

    /// Token usage counters, when the API reports them.
    pub fn usage(&self) -> Option<Usage> {
        self.body
            .get("usage")
            .and_then(|usage| serde_json::from_value(usage.clone()).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: i32,
    #[serde(default)]
    pub completion_tokens: i32,
    pub total_tokens: i32,
}
