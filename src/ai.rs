use crate::ai_response::{
    BOSS_INSTRUCTION, SCHEMA_NAME, TurnOutcome, create_turn_prompt, response_schema,
};
use crate::error::{AIError, GenerationError};
use crate::message::Message;
use crate::meter::MeterState;
use crate::settings::Settings;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::sync::Arc;
use tokio::time::{Duration, timeout};

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub instruction: String,
    pub prompt: String,
}

/// The external text generator playing the boss.
///
/// Implementations return the raw reply body. `GenerationError::Transport`
/// means no response came back at all; `GenerationError::Rejected` means a
/// response came back but is unusable.
#[async_trait]
pub trait DialogueGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

#[derive(Clone)]
pub struct OpenAIGenerator {
    client: Option<Client<OpenAIConfig>>,
    timeout: Duration,
}

impl OpenAIGenerator {
    pub fn from_settings(settings: &Settings) -> Self {
        let client = settings
            .openai_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(|api_key| {
                let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
                if let Some(api_base) = &settings.api_base {
                    openai_config = openai_config.with_api_base(api_base);
                }
                // One attempt per turn: a 429 must come back as an API error.
                Client::with_config(openai_config).with_backoff(
                    ExponentialBackoffBuilder::new()
                        .with_max_elapsed_time(Some(Duration::ZERO))
                        .build(),
                )
            });

        Self {
            client,
            timeout: settings.request_timeout(),
        }
    }
}

#[async_trait]
impl DialogueGenerator for OpenAIGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let Some(client) = &self.client else {
            return Err(GenerationError::Transport(
                "OpenAI API key is not configured".to_string(),
            ));
        };

        let response_format = ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: None,
                name: SCHEMA_NAME.into(),
                schema: Some(response_schema()),
                // Strict mode refuses optional properties.
                strict: Some(false),
            },
        };

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(request.instruction.as_str())
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(request.prompt.as_str())
                    .build()?
                    .into(),
            ])
            .response_format(response_format)
            .build()?;

        let response = match timeout(self.timeout, client.chat().create(chat_request)).await {
            Ok(res) => res?,
            Err(_) => {
                return Err(GenerationError::Transport(format!(
                    "Request timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::Rejected("Response has no content".to_string()))
    }
}

/// Turns one player submission into a [`TurnOutcome`].
///
/// Unusable replies degrade to [`TurnOutcome::fallback`]; only transport
/// failures reach the caller. One generator call per turn, never retried.
#[derive(Clone)]
pub struct TurnResolver {
    generator: Arc<dyn DialogueGenerator>,
    model: String,
}

impl TurnResolver {
    pub fn new(generator: Arc<dyn DialogueGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(OpenAIGenerator::from_settings(settings)),
            settings.model.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(
        &self,
        player_input: &str,
        history: &[Message],
        meters: &MeterState,
    ) -> GenerationRequest {
        GenerationRequest {
            model: self.model.clone(),
            instruction: BOSS_INSTRUCTION.to_string(),
            prompt: create_turn_prompt(player_input, history, meters),
        }
    }

    pub async fn resolve(
        &self,
        player_input: &str,
        history: &[Message],
        meters: &MeterState,
    ) -> Result<TurnOutcome, AIError> {
        let request = self.build_request(player_input, history, meters);
        log::debug!("Requesting boss reply from model {}", request.model);

        match self.generator.generate(&request).await {
            Ok(reply) => match TurnOutcome::from_json(&reply) {
                Ok(outcome) => {
                    log::debug!("Boss reply parsed: {outcome:?}");
                    Ok(outcome)
                }
                Err(e) => {
                    log::warn!("Falling back, unparseable reply ({e}): {reply:?}");
                    Ok(TurnOutcome::fallback())
                }
            },
            Err(GenerationError::Rejected(reason)) => {
                log::warn!("Falling back, generator rejected the request: {reason}");
                Ok(TurnOutcome::fallback())
            }
            Err(GenerationError::Transport(reason)) => {
                log::error!("No reply from the generator: {reason}");
                Err(AIError::Transport(reason))
            }
        }
    }
}
