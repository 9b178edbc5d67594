/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds, translating each quote-separated segment
 * - `MockProvider::dropping_separator()` - Loses one segment boundary
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::malformed()` - Fails as if the response could not be parsed
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Succeeds but merges the first two segments
    DropSeparator,
    /// Always fails with a connection error
    Failing,
    /// Always fails with a parse error
    Malformed,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Known segment translations
    dictionary: HashMap<String, String>,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Texts received, in order
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            dictionary: HashMap::new(),
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that drops one separator from every response
    pub fn dropping_separator() -> Self {
        Self::new(MockBehavior::DropSeparator)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock whose responses never parse
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Add a known translation for one segment
    pub fn with_translation(mut self, source: &str, translated: &str) -> Self {
        self.dictionary.insert(source.to_string(), translated.to_string());
        self
    }

    /// Number of translate calls received
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Texts received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn translate_segments(&self, target_language: &str, text: &str) -> Vec<String> {
        text.split('"')
            .map(|segment| match self.dictionary.get(segment) {
                Some(translated) => translated.clone(),
                None => format!("[{}] {}", target_language, segment),
            })
            .collect()
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        _source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(text.to_string());

        match self.behavior {
            MockBehavior::Working => Ok(self.translate_segments(target_language, text).join("\"")),

            MockBehavior::DropSeparator => {
                let segments = self.translate_segments(target_language, text);
                match segments.split_first() {
                    Some((first, rest)) if !rest.is_empty() => {
                        Ok(format!("{} {}", first, rest.join("\"")))
                    }
                    _ => Ok(segments.join("\"")),
                }
            }

            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated provider failure".to_string(),
            )),

            MockBehavior::Malformed => Err(ProviderError::ParseError(
                "Missing translated text at [0][0][0]".to_string(),
            )),
        }
    }
}
