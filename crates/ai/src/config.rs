/// Hosted AI provider configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key; `None` disables the remote path entirely.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API (default: `https://api.openai.com/v1`).
    pub base_url: String,
    /// Per-request timeout in seconds (default: `60`).
    pub timeout_secs: u64,
    /// Chat model used for structured analysis (default: `gpt-4o`).
    pub chat_model: String,
    /// Image generation model (default: `dall-e-3`).
    pub image_model: String,
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

impl AiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default                     |
    /// |--------------------|-----------------------------|
    /// | `OPENAI_API_KEY`   | unset (remote path off)     |
    /// | `OPENAI_BASE_URL`  | `https://api.openai.com/v1` |
    /// | `AI_TIMEOUT_SECS`  | `60`                        |
    /// | `AI_CHAT_MODEL`    | `gpt-4o`                    |
    /// | `AI_IMAGE_MODEL`   | `dall-e-3`                  |
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");

        let chat_model = std::env::var("AI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".into());
        let image_model = std::env::var("AI_IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".into());

        Self {
            api_key,
            base_url,
            timeout_secs,
            chat_model,
            image_model,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 60,
            chat_model: "gpt-4o".into(),
            image_model: "dall-e-3".into(),
        }
    }
}
