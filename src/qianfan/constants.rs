pub const DEFAULT_MODEL: &str = "ernie-4.0-turbo-8k";
pub const API_BASE: &str = "https://qianfan.baidubce.com";
pub const CHAT_ROUTE: &str = "/v2/chat";
pub const COMPLETIONS_ROUTE: &str = "/v2/completions";
pub const API_KEY_ENV_VAR: &str = "QIANFAN_API_KEY";
