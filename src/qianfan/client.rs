//! Request shaping and dispatch for the two Qianfan call styles.

use serde_json::{Value, json};

use crate::core::{HttpClient, LlmError, OptionMap};

use super::{constants, response::QianfanResponse};

/// Option keys that steer routing or transport rather than the wire payload.
const CONTROL_KEYS: [&str; 4] = ["endpoint", "retry_count", "request_timeout", "backoff_factor"];

/// Shared transport for both call variants.
pub(crate) struct Transport {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl Transport {
    pub(crate) fn new(http: HttpClient, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<QianfanResponse, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        )];

        let payload = self.http.post_json(&url, &headers, body).await?;
        Ok(QianfanResponse::new(payload))
    }
}

/// Vendor client selected once at construction.
///
/// `Chat` issues multi-turn message-list calls, `Completion` raw prompt
/// calls; each variant owns its own request shaping and route resolution.
pub(crate) enum ClientVariant {
    Chat(ChatCompletion),
    Completion(TextCompletion),
}

impl ClientVariant {
    /// Insert the prompt into the outgoing options in this variant's shape.
    pub(crate) fn shape(&self, prompt: &str, options: OptionMap) -> OptionMap {
        match self {
            ClientVariant::Chat(client) => client.shape(prompt, options),
            ClientVariant::Completion(client) => client.shape(prompt, options),
        }
    }

    /// Issue the shaped options to the API.
    pub(crate) async fn dispatch(&self, options: &OptionMap) -> Result<QianfanResponse, LlmError> {
        match self {
            ClientVariant::Chat(client) => client.dispatch(options).await,
            ClientVariant::Completion(client) => client.dispatch(options).await,
        }
    }
}

/// Chat-style calls against `/v2/chat/...`.
pub(crate) struct ChatCompletion {
    transport: Transport,
}

impl ChatCompletion {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn shape(&self, prompt: &str, mut options: OptionMap) -> OptionMap {
        options.insert(
            "messages".to_string(),
            json!([{ "role": "user", "content": prompt }]),
        );
        options
    }

    async fn dispatch(&self, options: &OptionMap) -> Result<QianfanResponse, LlmError> {
        let path = chat_path(options);
        let body = Value::Object(payload_options(options));
        self.transport.post(&path, &body).await
    }
}

/// Raw completion calls against `/v2/completions`.
pub(crate) struct TextCompletion {
    transport: Transport,
}

impl TextCompletion {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn shape(&self, prompt: &str, mut options: OptionMap) -> OptionMap {
        options.insert("prompt".to_string(), Value::String(prompt.to_string()));
        options
    }

    async fn dispatch(&self, options: &OptionMap) -> Result<QianfanResponse, LlmError> {
        let path = completion_path(options);
        let body = Value::Object(payload_options(options));
        self.transport.post(&path, &body).await
    }
}

/// Wire payload: everything in the merged options except the control keys.
fn payload_options(options: &OptionMap) -> OptionMap {
    let mut payload = options.clone();
    for key in CONTROL_KEYS {
        payload.remove(key);
    }
    payload
}

/// An `endpoint` option routes chat calls to a custom model deployment.
fn chat_path(options: &OptionMap) -> String {
    match options.get("endpoint").and_then(Value::as_str) {
        Some(endpoint) => format!("{}/{}", constants::CHAT_ROUTE, endpoint),
        None => format!("{}/completions", constants::CHAT_ROUTE),
    }
}

fn completion_path(options: &OptionMap) -> String {
    match options.get("endpoint").and_then(Value::as_str) {
        Some(endpoint) => format!("{}/{}", constants::COMPLETIONS_ROUTE, endpoint),
        None => constants::COMPLETIONS_ROUTE.to_string(),
    }
}
