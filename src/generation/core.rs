/*!
 * Core generation service.
 *
 * `ContentGenerator` drives exactly one chat-completion round trip per run:
 * build the prompt, call the provider, parse the items out of the reply.
 * There is no retry loop; a failed run surfaces its error and the caller
 * decides whether to start a fresh run.
 */

use log::{debug, info, warn};

use crate::document::{EasyReadDocument, SourceText};
use crate::errors::GenerationError;
use crate::generation::parse::parse_items;
use crate::generation::prompts::EasyReadPromptBuilder;
use crate::providers::{ChatCompletionRequest, ChatProvider};

/// Default sampling temperature for simplification
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Default output token bound
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Service turning captured page text into an easy-read document
pub struct ContentGenerator<P: ChatProvider> {
    /// Provider handling the chat completion
    provider: P,
    /// Model identifier passed to the provider
    model: String,
    /// Prompt template
    prompt: EasyReadPromptBuilder,
    /// Sampling temperature
    temperature: f32,
    /// Output token bound
    max_tokens: u32,
}

impl<P: ChatProvider> ContentGenerator<P> {
    /// Create a generator with default sampling parameters.
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            prompt: EasyReadPromptBuilder::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the prompt template.
    pub fn prompt(mut self, prompt: EasyReadPromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    /// Override the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the output token bound.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Run one simplification round trip.
    ///
    /// Empty source text fails before any network traffic. A well-formed
    /// reply whose item count diverges from the captured segment count is
    /// accepted with a warning; the model may legitimately split or merge
    /// sentences.
    pub async fn generate(&self, source: &SourceText) -> Result<EasyReadDocument, GenerationError> {
        if source.is_empty() {
            return Err(GenerationError::ExtractionEmpty);
        }

        let request = ChatCompletionRequest::new(&self.model)
            .add_message("user", self.prompt.build(source))
            .temperature(self.temperature)
            .max_tokens(self.max_tokens);

        debug!(
            "Requesting easy-read generation for {} segment(s) with model {}",
            source.len(),
            self.model
        );

        let response = self.provider.complete(request).await?;
        if let Some(usage) = &response.usage {
            debug!(
                "Token usage: {} prompt, {} completion",
                usage.prompt_tokens, usage.completion_tokens
            );
        }
        let content = response.first_content()?;
        let document = parse_items(content)?;

        if document.len() < source.len() {
            warn!(
                "Generated {} item(s) from {} source segment(s); output may be incomplete",
                document.len(),
                source.len()
            );
        }
        info!("Generated {} easy-read item(s)", document.len());

        Ok(document)
    }
}
