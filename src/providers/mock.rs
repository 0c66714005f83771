/*!
 * Mock provider implementations for testing.
 *
 * This module provides mocks that simulate the external APIs:
 * - `MockChatProvider` - canned/failing chat completions with a call counter
 * - `MockPictogramSearch` - canned/failing pictogram search results
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::pictograms::{PictogramHit, PictogramSearch};
use crate::providers::{ChatCompletionRequest, ChatCompletionResponse, ChatProvider};

/// Behavior mode for the mock chat provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockChatBehavior {
    /// Always succeeds with the configured response text
    Working(String),
    /// Always fails with an API error
    Failing {
        /// Simulated HTTP status
        status_code: u16,
        /// Simulated error message
        message: String,
    },
    /// Succeeds with a response carrying no choices
    Empty,
}

/// Mock chat provider for testing generation behavior
#[derive(Debug, Clone)]
pub struct MockChatProvider {
    /// Behavior mode
    behavior: MockChatBehavior,
    /// Number of completions requested so far
    call_count: Arc<AtomicUsize>,
}

impl MockChatProvider {
    /// Create a mock with the given behavior
    pub fn new(behavior: MockChatBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that always answers with the given text
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockChatBehavior::Working(text.into()))
    }

    /// Create a mock that always fails with an API error
    pub fn failing(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(MockChatBehavior::Failing {
            status_code,
            message: message.into(),
        })
    }

    /// Create a mock whose responses carry no choices
    pub fn empty() -> Self {
        Self::new(MockChatBehavior::Empty)
    }

    /// Number of completion calls made against this mock (shared by clones)
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(
        &self,
        _request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockChatBehavior::Working(text) => {
                let json = format!(
                    r#"{{"choices":[{{"message":{{"role":"assistant","content":{}}}}}]}}"#,
                    serde_json::to_string(text)
                        .map_err(|e| ProviderError::ParseError(e.to_string()))?
                );
                serde_json::from_str(&json).map_err(|e| ProviderError::ParseError(e.to_string()))
            }
            MockChatBehavior::Failing {
                status_code,
                message,
            } => Err(ProviderError::ApiError {
                status_code: *status_code,
                message: message.clone(),
            }),
            MockChatBehavior::Empty => serde_json::from_str(r#"{"choices":[]}"#)
                .map_err(|e| ProviderError::ParseError(e.to_string())),
        }
    }
}

/// Behavior mode for the mock pictogram search
#[derive(Debug, Clone, PartialEq)]
pub enum MockSearchBehavior {
    /// Return the configured hit ids for every keyword
    Hits(Vec<u64>),
    /// Return an empty result set
    Empty,
    /// Fail with a request error (simulated network failure)
    Failing,
}

/// Mock pictogram search for testing resolver behavior
#[derive(Debug, Clone)]
pub struct MockPictogramSearch {
    behavior: MockSearchBehavior,
    /// Number of searches issued so far
    call_count: Arc<AtomicUsize>,
}

impl MockPictogramSearch {
    /// Create a mock returning the given hit ids for every keyword
    pub fn with_hits(ids: Vec<u64>) -> Self {
        Self {
            behavior: MockSearchBehavior::Hits(ids),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock returning no results
    pub fn empty() -> Self {
        Self {
            behavior: MockSearchBehavior::Empty,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that fails every search
    pub fn failing() -> Self {
        Self {
            behavior: MockSearchBehavior::Failing,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of searches made against this mock (shared by clones)
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PictogramSearch for MockPictogramSearch {
    async fn search(
        &self,
        _language: &str,
        _keyword: &str,
    ) -> Result<Vec<PictogramHit>, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockSearchBehavior::Hits(ids) => {
                let json = serde_json::to_string(
                    &ids.iter()
                        .map(|id| serde_json::json!({ "_id": id }))
                        .collect::<Vec<_>>(),
                )
                .map_err(|e| ProviderError::ParseError(e.to_string()))?;
                serde_json::from_str(&json).map_err(|e| ProviderError::ParseError(e.to_string()))
            }
            MockSearchBehavior::Empty => Ok(Vec::new()),
            MockSearchBehavior::Failing => Err(ProviderError::RequestFailed(
                "Simulated network failure".to_string(),
            )),
        }
    }
}
