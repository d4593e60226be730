//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const MOCK_MODEL: &str = "mock-model";

enum MockReply {
    Text(String),
    Error(ProviderError),
}

/// One call as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system: Option<String>,
    pub prompt: String,
    pub params: GenerationParams,
}

/// Scripted text provider.
///
/// Replies queued with [`with_text`](Self::with_text) or
/// [`with_error`](Self::with_error) are served in order; once the queue is
/// empty every call echoes the prompt.
pub struct MockTextProvider {
    enabled: bool,
    replies: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<RecordedCall>>,
    call_count: AtomicUsize,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(MockReply::Text(text.into()));
        self
    }

    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(MockReply::Error(error));
        self
    }

    fn push(&self, reply: MockReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    /// Number of `generate` calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        system: Option<&str>,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                system: system.map(str::to_string),
                prompt: prompt.to_string(),
                params: params.clone(),
            });
        }

        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        let reply = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        let text = match reply {
            Some(MockReply::Text(text)) => text,
            Some(MockReply::Error(error)) => return Err(error),
            None => format!("Mock response for: {}", prompt),
        };

        Ok(ProviderResponse {
            output_tokens: text.len() as u32 / 4,
            text: Some(text),
            model: MOCK_MODEL.to_string(),
            input_tokens: prompt.len() as u32 / 4,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_scripted_replies_in_order() {
        let provider = MockTextProvider::new(true)
            .with_text("first")
            .with_error(ProviderError::RateLimited);
        let params = GenerationParams::default();

        let first = provider.generate(None, "a", &params).await.unwrap();
        assert_eq!(first.text.as_deref(), Some("first"));

        let second = provider.generate(None, "b", &params).await;
        assert!(matches!(second, Err(ProviderError::RateLimited)));

        let third = provider.generate(Some("sys"), "c", &params).await.unwrap();
        assert_eq!(third.text.as_deref(), Some("Mock response for: c"));

        assert_eq!(provider.call_count(), 3);
        assert_eq!(provider.calls()[2].system.as_deref(), Some("sys"));
    }

    #[tokio::test]
    async fn disabled_provider_fails_but_still_counts() {
        let provider = MockTextProvider::new(false);

        let result = provider
            .generate(None, "hello", &GenerationParams::default())
            .await;

        assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
        assert!(provider.health_check().await.is_err());
        assert_eq!(provider.call_count(), 1);
    }
}
