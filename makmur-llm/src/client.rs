use std::fmt;
use std::sync::Arc;

use anyhow::Context as _;
use makmur_sheet::InventoryRecord;
use makmur_utils::env::{env_bool, env_trimmed, env_u64};
use tracing::{debug, warn};

use crate::prompt::{BUSY_REPLY, FALLBACK_REPLY, system_prompt};
use crate::provider::{
    CompletionProvider, DEFAULT_GEMINI_MODEL, GeminiProvider, OllamaProvider,
};

/// Answers stock questions using the current inventory as context. Never
/// fails: provider errors become [`FALLBACK_REPLY`].
#[derive(Clone)]
pub struct AssistantService {
    provider: Arc<dyn CompletionProvider>,
    label: String,
}

impl fmt::Debug for AssistantService {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AssistantService")
            .field("provider", &self.label)
            .finish()
    }
}

impl AssistantService {
    pub fn new(provider: Arc<dyn CompletionProvider>, label: impl Into<String>) -> Self {
        Self {
            provider,
            label: label.into(),
        }
    }

    /// `None` when the assistant is switched off or has no credential.
    pub fn from_env_optional() -> anyhow::Result<Option<Self>> {
        if !env_bool("ASSISTANT_ENABLED", true) {
            return Ok(None);
        }

        let provider = env_trimmed("ASSISTANT_PROVIDER")
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_else(|| "gemini".to_owned());

        let configured = match provider.as_str() {
            "ollama" => env_trimmed("OLLAMA_HOST").is_some() || env_trimmed("OLLAMA_MODEL").is_some(),
            _ => env_trimmed("GEMINI_API_KEY").is_some(),
        };
        if !configured {
            return Ok(None);
        }

        Ok(Some(Self::from_env()?))
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let provider = env_trimmed("ASSISTANT_PROVIDER")
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_else(|| "gemini".to_owned());

        match provider.as_str() {
            "gemini" => {
                let api_key = env_trimmed("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
                let model =
                    env_trimmed("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned());

                let mut gemini = GeminiProvider::new(api_key, model)?;
                if let Some(base_url) = env_trimmed("GEMINI_BASE_URL") {
                    gemini = gemini.with_base_url(base_url);
                }

                let label = format!("gemini:{}", gemini.model());
                Ok(Self::new(Arc::new(gemini), label))
            }
            "ollama" => {
                let host =
                    env_trimmed("OLLAMA_HOST").unwrap_or_else(|| "http://127.0.0.1".to_owned());
                let port = u16::try_from(env_u64("OLLAMA_PORT", 11434))
                    .context("OLLAMA_PORT out of u16 range")?;
                let model =
                    env_trimmed("OLLAMA_MODEL").unwrap_or_else(|| "gpt-oss:20b-cloud".to_owned());

                let ollama = OllamaProvider::new(host, port, model);
                let label = format!("ollama:{}", ollama.model());
                Ok(Self::new(Arc::new(ollama), label))
            }
            other => anyhow::bail!("unknown ASSISTANT_PROVIDER `{other}` (expected gemini or ollama)"),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Ask one question about `records`.
    pub async fn ask(&self, user_text: &str, records: &[InventoryRecord]) -> String {
        let system = system_prompt(records);

        match self.provider.complete(&system, user_text).await {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    debug!(provider = %self.label, "assistant returned no text");
                    BUSY_REPLY.to_owned()
                } else {
                    reply.to_owned()
                }
            }
            Err(err) => {
                warn!(?err, provider = %self.label, "assistant request failed; using fallback reply");
                FALLBACK_REPLY.to_owned()
            }
        }
    }
}
