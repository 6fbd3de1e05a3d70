use std::time::Duration;

use async_openai::{
    config::{AzureConfig, OpenAIConfig},
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};

use crate::{
    config::{parse_llm_provider_model, LlmConfig},
    error::{CompanionError, Result},
    llm::provider::CompletionOptions,
    models::{ChatMessage, MessageRole},
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

#[derive(Debug, Clone)]
struct ApiConfig {
    provider: String,
    base_url: String,
    api_key: Option<String>,
    model: String,
    api_version: String,
    timeout_secs: u64,
}

#[derive(Clone)]
enum ChatClient {
    OpenAi(Client<OpenAIConfig>),
    Azure(Client<AzureConfig>),
}

impl ChatClient {
    async fn create(
        &self,
        request: CreateChatCompletionRequest,
    ) -> std::result::Result<CreateChatCompletionResponse, OpenAIError> {
        match self {
            Self::OpenAi(client) => client.chat().create(request).await,
            Self::Azure(client) => client.chat().create(request).await,
        }
    }
}

#[derive(Clone)]
pub struct LlmApiClient {
    client: ChatClient,
    config: ApiConfig,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_config = ApiConfig::from_llm_config(config);

        let needs_api_key = !matches!(
            api_config.provider.as_str(),
            "ollama" | "local" | "lmstudio"
        );

        if needs_api_key && api_config.api_key.is_none() {
            return Err(CompanionError::Llm(
                "API key required for this provider".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()
            .map_err(|error| {
                CompanionError::Llm(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        // A failed model call is reported, never retried.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let api_key = api_config.api_key.clone().unwrap_or_default();
        let client = if api_config.provider == "azure" {
            let azure_config = AzureConfig::new()
                .with_api_base(api_config.base_url.clone())
                .with_api_version(api_config.api_version.clone())
                .with_deployment_id(api_config.model.clone())
                .with_api_key(api_key);

            ChatClient::Azure(
                Client::with_config(azure_config)
                    .with_http_client(http_client)
                    .with_backoff(backoff),
            )
        } else {
            let openai_config = OpenAIConfig::new()
                .with_api_base(api_config.base_url.clone())
                .with_api_key(api_key);

            ChatClient::OpenAi(
                Client::with_config(openai_config)
                    .with_http_client(http_client)
                    .with_backoff(backoff),
            )
        };

        Ok(Self {
            client,
            config: api_config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Send a full message sequence and return the text of the first choice.
    pub async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String> {
        if messages.is_empty() {
            return Err(CompanionError::Validation(
                "At least one message is required".to_string(),
            ));
        }

        let request = self.build_request(messages, options)?;

        tracing::debug!(
            model = %self.config.model,
            base_url = %self.config.base_url,
            message_count = messages.len(),
            "Sending chat completion request"
        );

        match self.client.create(request).await {
            Ok(response) => Self::extract_content(response),
            Err(error) => {
                if let Some(rate_limit_error) = Self::rate_limit_error(&error) {
                    return Err(rate_limit_error);
                }

                if let Some(auth_error) = Self::auth_error(&error) {
                    return Err(auth_error);
                }

                Err(Self::map_openai_error(error))
            }
        }
    }

    fn build_request(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CreateChatCompletionRequest> {
        let messages = messages
            .iter()
            .map(Self::to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let mut request = CreateChatCompletionRequestArgs::default();
        request.model(self.config.model.clone()).messages(messages);

        if let Some(temperature) = options.temperature {
            request.temperature(temperature);
        }

        if let Some(max_tokens) = options.max_tokens {
            request.max_tokens(max_tokens);
        }

        request.build().map_err(|error| {
            CompanionError::Validation(format!("Invalid LLM completion request: {error}"))
        })
    }

    fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
        let content = message.content.as_str();
        let built: std::result::Result<ChatCompletionRequestMessage, OpenAIError> = match message.role {
            MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(content)
                .build()
                .map(Into::into),
            MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()
                .map(Into::into),
            MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(content)
                .build()
                .map(Into::into),
        };

        built.map_err(|error| {
            CompanionError::Validation(format!("Invalid {:?} message: {error}", message.role))
        })
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompanionError::Llm("LLM response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if message.trim().is_empty() {
            return Err(CompanionError::Llm(
                "LLM response contained empty content".to_string(),
            ));
        }

        Ok(message)
    }

    fn rate_limit_error(error: &OpenAIError) -> Option<CompanionError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) =>
            {
                Some(CompanionError::LlmRateLimit { retry_after: None })
            }
            OpenAIError::ApiError(api_error) if Self::is_rate_limit_api_error(api_error) => {
                Some(CompanionError::LlmRateLimit { retry_after: None })
            }
            _ => None,
        }
    }

    fn auth_error(error: &OpenAIError) -> Option<CompanionError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::UNAUTHORIZED)
                    || reqwest_error.status() == Some(reqwest::StatusCode::FORBIDDEN) =>
            {
                Some(CompanionError::Llm(format!(
                    "LLM authentication failed: {reqwest_error}"
                )))
            }
            OpenAIError::ApiError(api_error) if Self::is_auth_api_error(api_error) => Some(
                CompanionError::Llm(format!("LLM authentication failed: {api_error}")),
            ),
            _ => None,
        }
    }

    fn is_rate_limit_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("rate limit")
            || message.contains("too many requests")
            || error_type.contains("rate_limit")
            || code.contains("rate_limit")
            || code == "insufficient_quota"
    }

    fn is_auth_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("unauthorized")
            || message.contains("forbidden")
            || message.contains("authentication")
            || message.contains("invalid api key")
            || message.contains("access denied")
            || code.contains("invalid_api_key")
            || code == "401"
            || error_type.contains("authentication")
    }

    fn map_openai_error(error: OpenAIError) -> CompanionError {
        match error {
            OpenAIError::Reqwest(reqwest_error) => {
                CompanionError::Llm(format!("LLM request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                CompanionError::Llm(format!("LLM API error: {api_error}"))
            }
            OpenAIError::JSONDeserialize(err) => {
                CompanionError::Llm(format!("Failed to parse LLM response: {err}"))
            }
            other => CompanionError::Llm(other.to_string()),
        }
    }
}

impl ApiConfig {
    fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider, model) = parse_llm_provider_model(&config.model);
        let provider = provider.to_lowercase();

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(&provider).to_string());

        let normalized_model = if provider == "local" {
            config.model.clone()
        } else {
            model.to_string()
        };

        Self {
            provider,
            base_url,
            api_key: config.api_key.clone(),
            model: normalized_model,
            api_version: config.api_version.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider {
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => LMSTUDIO_BASE_URL,
        _ => OPENAI_BASE_URL,
    }
}
