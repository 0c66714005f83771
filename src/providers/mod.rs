/*!
 * API clients for the external services the pipeline calls.
 *
 * This module contains the chat-completion provider seam:
 * - `openai`: OpenAI-compatible chat completions API
 * - `mock`: mock providers for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

pub use openai::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Common trait for chat-completion providers
///
/// All generation traffic goes through this seam so that the pipeline can be
/// exercised against mock providers in tests.
#[async_trait]
pub trait ChatProvider: Send + Sync + Debug {
    /// Complete a chat request
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<ChatCompletionResponse, ProviderError>` - The response or an error
    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError>;
}

pub mod mock;
pub mod openai;
