use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{CompanionError, Result};
use crate::llm::api::LlmApiClient;
use crate::models::ChatMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    Azure,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionOptions {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            temperature: Some(config.temperature),
            max_tokens: Some(config.max_tokens),
        }
    }
}

/// Something that turns a message sequence into a reply.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String>;
}

#[derive(Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<Arc<LlmConfig>>,
    client: Option<Arc<LlmApiClient>>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            "azure" => LlmBackend::Azure,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        if matches!(backend, LlmBackend::Unavailable { .. }) {
            return Self {
                backend,
                config: Some(Arc::new(config.clone())),
                client: None,
            };
        }

        match LlmApiClient::new(config) {
            Ok(client) => {
                tracing::info!(
                    model = client.model(),
                    base_url = client.base_url(),
                    "LLM client ready"
                );
                Self {
                    backend,
                    config: Some(Arc::new(config.clone())),
                    client: Some(Arc::new(client)),
                }
            }
            Err(error) => Self {
                backend: LlmBackend::Unavailable {
                    reason: error.to_string(),
                },
                config: Some(Arc::new(config.clone())),
                client: None,
            },
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
            client: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    /// Options taken from the configuration, or none when unconfigured.
    pub fn completion_options(&self) -> CompletionOptions {
        self.config()
            .map(CompletionOptions::from_config)
            .unwrap_or_default()
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM client not initialized".to_string(),
        }
    }
}

#[async_trait]
impl ChatCompletion for LlmProvider {
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String> {
        let Some(client) = self.client.as_ref().filter(|_| self.is_available()) else {
            return Err(CompanionError::LlmUnavailable(self.unavailable_reason()));
        };

        client.complete_chat(messages, options).await
    }
}
