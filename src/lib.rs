//! # qianfan-lm
//!
//! Uniform language-model calling interface for Baidu's Qianfan API.
//!
//! The adapter forwards a text prompt to the remote completion service,
//! normalizes the response into a list of completion strings, and records
//! every call in an inspectable history.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qianfan_lm::{LanguageModel, OptionMap, QianfanConfig, QianfanLm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = QianfanConfig::from_env()?.with_model("ernie-4.0-turbo-8k");
//!     let mut lm = QianfanLm::new(config)?;
//!
//!     let completions = lm
//!         .call("Share a fun fact about Rust programming.", true, false, OptionMap::new())
//!         .await?;
//!     println!("{}", completions[0]);
//!     Ok(())
//! }
//! ```
//!
//! Per-call options override the construction-time defaults key by key;
//! `only_completed=false` and `return_sorted=true` are rejected, since the
//! API exposes neither partial responses nor choice ordering.

pub mod core;
pub mod qianfan;

pub use crate::core::{
    error::LlmError,
    http::HttpClientConfig,
    options::{OptionMap, merge},
    traits::LanguageModel,
};
pub use qianfan::{CallRecord, InteractionMode, QianfanConfig, QianfanLm, QianfanResponse, Usage};
