use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Unsupported call option: {0}")]
    Unsupported(String),

    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Missing `{0}` in Qianfan response")]
    MissingField(&'static str),
}
