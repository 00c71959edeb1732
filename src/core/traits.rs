use async_trait::async_trait;

use super::{error::LlmError, options::OptionMap};

/// Uniform calling interface over a remote language model.
///
/// Implementations own a growing call history, hence the `&mut self`
/// receivers; an instance must not be shared across callers without
/// external synchronization.
#[async_trait]
pub trait LanguageModel {
    /// Raw response type returned by the underlying provider.
    type Response;

    /// Issue a single request and record it in the call history.
    async fn basic_request(
        &mut self,
        prompt: &str,
        overrides: OptionMap,
    ) -> Result<Self::Response, LlmError>;

    /// Retrieve a raw completion response.
    ///
    /// The hook for rate-limiting and caching layers to wrap.
    async fn request(
        &mut self,
        prompt: &str,
        overrides: OptionMap,
    ) -> Result<Self::Response, LlmError>;

    /// Retrieve completions for `prompt`, normalized to a list of strings.
    async fn call(
        &mut self,
        prompt: &str,
        only_completed: bool,
        return_sorted: bool,
        overrides: OptionMap,
    ) -> Result<Vec<String>, LlmError>;
}
