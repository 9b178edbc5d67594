/*!
 * Translation client.
 *
 * Wraps a provider with the cache and the request log: a cached text is
 * answered locally, anything else goes to the provider and, on success, is
 * cached and counted against the sliding window.
 */

use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

use super::cache::TranslationCache;
use super::rate_limiter::RateLimiter;

/// Source language sent when none is configured
pub const AUTO_DETECT: &str = "auto";

/// Provider access with caching and request accounting
#[derive(Clone)]
pub struct TranslationClient {
    provider: Arc<dyn TranslationProvider>,
    cache: TranslationCache,
    rate_limiter: RateLimiter,
}

impl TranslationClient {
    /// Create a client over `provider`
    pub fn new(
        provider: Arc<dyn TranslationProvider>,
        cache: TranslationCache,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            provider,
            cache,
            rate_limiter,
        }
    }

    /// Translate `text`, consulting the cache first.
    ///
    /// A cache hit makes no provider call and is not logged as a request.
    /// Provider failures are neither cached nor logged.
    pub async fn translate(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        self.translate_checked(source_language, target_language, text, |reply| {
            Ok::<_, ProviderError>(reply.to_string())
        })
        .await
    }

    /// Translate `text` and run `check` on the reply before it is cached.
    ///
    /// A reply rejected by `check` is counted as a request but never cached.
    /// A cached entry rejected by `check` is ignored and fetched again.
    pub async fn translate_checked<T, E, F>(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
        check: F,
    ) -> Result<T, E>
    where
        E: From<ProviderError> + std::fmt::Display,
        F: Fn(&str) -> Result<T, E>,
    {
        if let Some(cached) = self.cache.get(text, target_language) {
            match check(&cached) {
                Ok(value) => return Ok(value),
                Err(e) => warn!("Ignoring unusable cached translation: {}", e),
            }
        }

        let source_language = if source_language.trim().is_empty() {
            AUTO_DETECT
        } else {
            source_language
        };

        let start_time = Instant::now();
        let translated = self
            .provider
            .translate(source_language, target_language, text)
            .await?;

        debug!(
            "{} translated {} chars in {:?}",
            self.provider.name(),
            text.chars().count(),
            start_time.elapsed()
        );

        // Quota is advisory, a broken log must not fail the translation
        if let Err(e) = self.rate_limiter.record_request() {
            warn!("Failed to record translation request: {}", e);
        }

        let value = check(&translated)?;
        self.cache.store(text, target_language, &translated);

        Ok(value)
    }

    /// The cache used by this client
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// The request log used by this client
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
