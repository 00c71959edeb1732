use std::env;
use std::time::Duration;

use serde_json::{Value, json};

use crate::core::{HttpClientConfig, LlmError, OptionMap};

use super::constants;

/// Interaction style expected by the model deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// Multi-turn message-list calls (`messages` key).
    Chat,
    /// Raw completion calls (`prompt` key).
    Completion,
}

/// Qianfan-specific configuration for the adapter.
///
/// Immutable once the adapter is constructed; per-call overrides are merged
/// on top at request time.
#[derive(Debug, Clone)]
pub struct QianfanConfig {
    pub api_key: String,
    pub model: String,
    pub mode: InteractionMode,
    pub endpoint: Option<String>,
    pub retry_count: Option<u32>,
    /// Request timeout in seconds.
    pub request_timeout: Option<f64>,
    pub backoff_factor: Option<f64>,
    pub base_url: String,
    /// Additional default call options merged into every request.
    pub defaults: OptionMap,
}

impl QianfanConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: constants::DEFAULT_MODEL.to_string(),
            mode: InteractionMode::Chat,
            endpoint: None,
            retry_count: None,
            request_timeout: None,
            backoff_factor: None,
            base_url: constants::API_BASE.to_string(),
            defaults: OptionMap::new(),
        }
    }

    /// Read the api key from the `QIANFAN_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = env::var(constants::API_KEY_ENV_VAR).map_err(|_| {
            LlmError::ProviderConfiguration(format!("{} not set.", constants::API_KEY_ENV_VAR))
        })?;
        Ok(Self::new(api_key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = Some(retry_count);
        self
    }

    /// Request timeout in seconds.
    pub fn with_request_timeout(mut self, request_timeout: f64) -> Self {
        self.request_timeout = Some(request_timeout);
        self
    }

    pub fn with_backoff_factor(mut self, backoff_factor: f64) -> Self {
        self.backoff_factor = Some(backoff_factor);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Add a default call option merged into every request.
    pub fn with_default_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(key.into(), value);
        self
    }

    /// Add several default call options at once.
    pub fn with_defaults(mut self, defaults: OptionMap) -> Self {
        for (key, value) in defaults {
            self.defaults.insert(key, value);
        }
        self
    }

    /// Seed the option bundle sent with every request.
    ///
    /// Precedence, lowest first: seeded sampling defaults, caller-supplied
    /// defaults, then the model identifier. The endpoint and transport knobs
    /// are injected only when explicitly configured; absence means the key is
    /// left out entirely, not set to zero.
    pub(crate) fn seed_options(&self) -> OptionMap {
        let mut options = OptionMap::new();
        options.insert("temperature".to_string(), json!(0.7));
        options.insert("top_p".to_string(), json!(1));
        options.insert("stream".to_string(), json!(false));

        for (key, value) in &self.defaults {
            options.insert(key.clone(), value.clone());
        }

        options.insert("model".to_string(), Value::String(self.model.clone()));
        if let Some(endpoint) = &self.endpoint {
            options.insert("endpoint".to_string(), Value::String(endpoint.clone()));
        }

        if let Some(retry_count) = self.retry_count {
            options.insert("retry_count".to_string(), json!(retry_count));
        }
        if let Some(request_timeout) = self.request_timeout {
            options.insert("request_timeout".to_string(), json!(request_timeout));
        }
        if let Some(backoff_factor) = self.backoff_factor {
            options.insert("backoff_factor".to_string(), json!(backoff_factor));
        }

        options
    }

    /// Map the configured transport knobs onto the HTTP layer, which owns
    /// their enforcement.
    pub(crate) fn http_config(&self) -> HttpClientConfig {
        let mut config = HttpClientConfig::default();
        if let Some(retry_count) = self.retry_count {
            config.max_retries = retry_count;
        }
        if let Some(request_timeout) = self.request_timeout {
            config.timeout = Duration::from_secs_f64(request_timeout);
        }
        if let Some(backoff_factor) = self.backoff_factor {
            config.backoff_factor = backoff_factor;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_sampling_defaults_and_model() {
        let options = QianfanConfig::new("key".to_string()).seed_options();

        assert_eq!(options["temperature"], json!(0.7));
        assert_eq!(options["top_p"], json!(1));
        assert_eq!(options["stream"], json!(false));
        assert_eq!(options["model"], json!(constants::DEFAULT_MODEL));
        assert!(!options.contains_key("endpoint"));
    }

    #[test]
    fn caller_defaults_override_seeded_values() {
        let options = QianfanConfig::new("key".to_string())
            .with_default_option("temperature", json!(0.2))
            .with_default_option("penalty_score", json!(1.5))
            .seed_options();

        assert_eq!(options["temperature"], json!(0.2));
        assert_eq!(options["penalty_score"], json!(1.5));
    }

    #[test]
    fn omitted_transport_knobs_are_not_injected() {
        let options = QianfanConfig::new("key".to_string()).seed_options();

        assert!(!options.contains_key("retry_count"));
        assert!(!options.contains_key("request_timeout"));
        assert!(!options.contains_key("backoff_factor"));
    }

    #[test]
    fn configured_transport_knobs_are_injected() {
        let options = QianfanConfig::new("key".to_string())
            .with_retry_count(2)
            .with_request_timeout(30.0)
            .with_backoff_factor(1.5)
            .seed_options();

        assert_eq!(options["retry_count"], json!(2));
        assert_eq!(options["request_timeout"], json!(30.0));
        assert_eq!(options["backoff_factor"], json!(1.5));
    }

    #[test]
    fn transport_knobs_reach_the_http_layer() {
        let config = QianfanConfig::new("key".to_string())
            .with_retry_count(2)
            .with_request_timeout(30.0)
            .with_backoff_factor(1.5)
            .http_config();

        assert_eq!(config.max_retries, 2);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.backoff_factor, 1.5);
    }

    #[test]
    fn http_layer_keeps_its_own_defaults_when_knobs_are_absent() {
        let config = QianfanConfig::new("key".to_string()).http_config();
        let defaults = HttpClientConfig::default();

        assert_eq!(config.max_retries, defaults.max_retries);
        assert_eq!(config.timeout, defaults.timeout);
        assert_eq!(config.backoff_factor, defaults.backoff_factor);
    }
}
