//! Adapter exposing Qianfan through the uniform language-model interface.

use async_trait::async_trait;
use tracing::debug;

use crate::core::{HttpClient, LanguageModel, LlmError, OptionMap, merge};

use super::{
    client::{ChatCompletion, ClientVariant, TextCompletion, Transport},
    config::{InteractionMode, QianfanConfig},
    response::QianfanResponse,
};

/// Snapshot of one request/response pair plus the options used.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub prompt: String,
    pub response: QianfanResponse,
    /// Options the request was issued with, after the per-call merge.
    pub options: OptionMap,
    /// Caller-supplied overrides, before the merge.
    pub overrides: OptionMap,
}

/// Adapter around Baidu's Qianfan API.
///
/// Stateless per call except for the append-only call history.
pub struct QianfanLm {
    client: ClientVariant,
    kwargs: OptionMap,
    history: Vec<CallRecord>,
}

impl QianfanLm {
    pub fn new(config: QianfanConfig) -> Result<Self, LlmError> {
        let kwargs = config.seed_options();

        let http = HttpClient::new(config.http_config(), None)?;
        let transport = Transport::new(http, config.base_url, config.api_key);
        let client = match config.mode {
            InteractionMode::Chat => ClientVariant::Chat(ChatCompletion::new(transport)),
            InteractionMode::Completion => {
                ClientVariant::Completion(TextCompletion::new(transport))
            }
        };

        Ok(Self {
            client,
            kwargs,
            history: Vec::new(),
        })
    }

    /// Options seeded at construction, before any per-call merge.
    pub fn default_options(&self) -> &OptionMap {
        &self.kwargs
    }

    /// Every recorded call, oldest first.
    pub fn history(&self) -> &[CallRecord] {
        &self.history
    }

    /// Log the total tokens reported by the Qianfan API, when present.
    fn log_usage(&self, response: &QianfanResponse) {
        if let Some(usage) = response.usage() {
            debug!(
                total_tokens = usage.total_tokens,
                "Qianfan response token usage"
            );
        }
    }
}

#[async_trait]
impl LanguageModel for QianfanLm {
    type Response = QianfanResponse;

    async fn basic_request(
        &mut self,
        prompt: &str,
        overrides: OptionMap,
    ) -> Result<QianfanResponse, LlmError> {
        let merged = merge(&self.kwargs, &overrides);
        let options = self.client.shape(prompt, merged);

        let response = self.client.dispatch(&options).await?;

        self.history.push(CallRecord {
            prompt: prompt.to_string(),
            response: response.clone(),
            options,
            overrides,
        });

        Ok(response)
    }

    async fn request(
        &mut self,
        prompt: &str,
        overrides: OptionMap,
    ) -> Result<QianfanResponse, LlmError> {
        self.basic_request(prompt, overrides).await
    }

    async fn call(
        &mut self,
        prompt: &str,
        only_completed: bool,
        return_sorted: bool,
        overrides: OptionMap,
    ) -> Result<Vec<String>, LlmError> {
        if !only_completed {
            return Err(LlmError::Unsupported(
                "Qianfan does not support incomplete responses".to_string(),
            ));
        }
        if return_sorted {
            return Err(LlmError::Unsupported(
                "Sorting is not implemented for Qianfan".to_string(),
            ));
        }

        let response = self.request(prompt, overrides).await?;

        self.log_usage(&response);

        Ok(vec![response.result()?.to_string()])
    }
}
