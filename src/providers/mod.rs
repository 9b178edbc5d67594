/*!
 * Provider implementations for machine translation services.
 *
 * This module contains client implementations for:
 * - Google: the public `translate_a/single` endpoint
 * - Mock: deterministic provider for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the translation client.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Arguments
    /// * `source_language` - Provider language code, `auto` to detect
    /// * `target_language` - Provider language code
    /// * `text` - Text to translate, sent as-is
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<String, ProviderError>;
}

pub mod google;
pub mod mock;
