/*!
 * Tests for the cached translation client
 */

use anyhow::Result;
use std::sync::Arc;

use jsonbabel::database::{KeyValueStore, SqliteStore};
use jsonbabel::errors::ProviderError;
use jsonbabel::providers::mock::MockProvider;
use jsonbabel::translation::{RateLimiter, TranslationCache, TranslationClient};
use crate::common;

fn client_with(provider: &MockProvider, store: Arc<dyn KeyValueStore>) -> TranslationClient {
    TranslationClient::new(
        Arc::new(provider.clone()),
        TranslationCache::new(store.clone(), true),
        RateLimiter::with_defaults(store),
    )
}

/// Test that the same request twice hits the provider once
#[tokio::test]
async fn test_translate_sameTextTwice_shouldBeIdempotent() -> Result<()> {
    let provider = common::greeting_provider();
    let client = client_with(&provider, common::memory_store());

    let first = client.translate("en", "es", "Hello\"World").await?;
    let second = client.translate("en", "es", "Hello\"World").await?;

    assert_eq!(first, "Hola\"Mundo");
    assert_eq!(first, second);
    assert_eq!(provider.request_count(), 1);

    Ok(())
}

/// Test that a second client on the same database reuses the cache
#[tokio::test]
async fn test_translate_withSharedSqliteStore_shouldReuseEarlierRuns() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let db_path = temp_dir.path().join("jsonbabel.db");
    let provider = common::greeting_provider();

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db_path)?);
        client_with(&provider, store).translate("", "es", "Hello").await?;
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db_path)?);
    let client = client_with(&provider, store);

    assert_eq!(client.translate("", "es", "Hello").await?, "Hola");
    assert_eq!(provider.request_count(), 1);
    assert_eq!(client.rate_limiter().available_requests()?, 99);

    Ok(())
}

/// Test that a malformed response surfaces as a parse error
#[tokio::test]
async fn test_translate_withMalformedResponse_shouldReturnParseError() -> Result<()> {
    let provider = MockProvider::malformed();
    let client = client_with(&provider, common::memory_store());

    let result = client.translate("auto", "es", "Hello").await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
    assert_eq!(client.rate_limiter().available_requests()?, 100);
    assert_eq!(client.cache().stats().0, 0);

    Ok(())
}
