pub mod error;
pub mod http;
pub mod options;
pub mod traits;

pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig};
pub use options::{OptionMap, merge};
pub use traits::LanguageModel;
