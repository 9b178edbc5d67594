/*!
 * End-to-end tests for translating a single file
 */

use anyhow::Result;
use std::fs;

use jsonbabel::errors::TranslationError;
use jsonbabel::providers::mock::MockProvider;
use crate::common;

/// Test the greeting example: values translated, keys and numbers untouched
#[tokio::test]
async fn test_translateFile_withGreetingDocument_shouldWriteSpanishValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "greeting.json", common::GREETING_JSON)?;
    let output_dir = temp_dir.path().join("out");

    let pipeline = common::test_pipeline(common::greeting_provider(), common::memory_store(), 5000);
    let result = pipeline.translate_file(&input, &output_dir).await;

    assert!(result.success, "{:?}", result.error_message);
    let output_path = output_dir.join("greeting_es.json");
    assert_eq!(result.output_path.as_deref(), Some(output_path.as_path()));
    assert_eq!(fs::read_to_string(&output_path)?, r#"{"a": "Hola", "b": 5, "c": "Mundo"}"#);

    Ok(())
}

/// Test that formatting and nesting survive translation
#[tokio::test]
async fn test_translateFile_withPrettyPrintedDocument_shouldPreserveLayout() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_strings(temp_dir.path(), "menu.json")?;

    let provider = MockProvider::working()
        .with_translation("Start game", "Iniciar partida")
        .with_translation("Quit", "Salir")
        .with_translation("Hello", "Hola");
    let pipeline = common::test_pipeline(provider.clone(), common::memory_store(), 5000);

    let result = pipeline.translate_file(&input, temp_dir.path()).await;
    assert!(result.success, "{:?}", result.error_message);

    let translated = fs::read_to_string(temp_dir.path().join("menu_es.json"))?;
    let expected = r#"{
  "menu": {
    "start": "Iniciar partida",
    "quit": "Salir",
    "volume": 80
  },
  "dialogs": ["Hello", "World"],
  "title": "Hola"
}
"#;
    assert_eq!(translated, expected);
    assert_eq!(provider.requests(), vec!["Start game\"Quit\"Hello"]);

    Ok(())
}

/// Test that a value longer than the limit fails before any request
#[tokio::test]
async fn test_translateFile_withValueOverLimit_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "long.json",
        r#"{"short": "Hi", "long": "This sentence does not fit"}"#,
    )?;
    let provider = MockProvider::working();
    let pipeline = common::test_pipeline(provider.clone(), common::memory_store(), 10);

    let error = pipeline
        .try_translate_file(&input, temp_dir.path())
        .await
        .expect_err("value over the limit must fail");

    assert!(matches!(error, TranslationError::ValueTooLong { index: 1, limit: 10, .. }));
    assert_eq!(provider.request_count(), 0);
    assert!(!temp_dir.path().join("long_es.json").exists());

    let result = pipeline.translate_file(&input, temp_dir.path()).await;
    assert!(!result.success);
    assert!(result.error_message.unwrap_or_default().contains("over the request limit of 10"));

    Ok(())
}

/// Test that a dropped separator is a splice error and nothing is written
#[tokio::test]
async fn test_translateFile_withDroppedSeparator_shouldReportSpliceError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "greeting.json", common::GREETING_JSON)?;
    let pipeline = common::test_pipeline(MockProvider::dropping_separator(), common::memory_store(), 5000);

    let error = pipeline
        .try_translate_file(&input, temp_dir.path())
        .await
        .expect_err("dropped separator must fail");

    assert!(matches!(error, TranslationError::Splice { expected: 2, actual: 1 }));
    assert!(!temp_dir.path().join("greeting_es.json").exists());

    Ok(())
}

/// Test that a dropped separator is not cached for the next run
#[tokio::test]
async fn test_translateFile_afterDroppedSeparator_shouldRetryProviderOnSameStore() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "greeting.json", common::GREETING_JSON)?;
    let store = common::memory_store();

    let broken = common::test_pipeline(MockProvider::dropping_separator(), store.clone(), 5000);
    let first = broken.translate_file(&input, temp_dir.path()).await;
    assert!(!first.success);

    let provider = common::greeting_provider();
    let healthy = common::test_pipeline(provider.clone(), store, 5000);
    let second = healthy.translate_file(&input, temp_dir.path()).await;

    assert!(second.success, "{:?}", second.error_message);
    assert_eq!(provider.request_count(), 1);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("greeting_es.json"))?,
        r#"{"a": "Hola", "b": 5, "c": "Mundo"}"#
    );

    Ok(())
}

/// Test that an escaped quote in a key fails the file instead of corrupting it
#[tokio::test]
async fn test_translateFile_withEscapedQuoteInKey_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "notes.json",
        r#"{"a\"b": "x", "label": "Note:", "k": "v"}"#,
    )?;
    let provider = MockProvider::working();
    let pipeline = common::test_pipeline(provider.clone(), common::memory_store(), 5000);

    let result = pipeline.translate_file(&input, temp_dir.path()).await;

    assert!(!result.success);
    assert!(result.error_message.unwrap_or_default().contains("Escaped quote at byte offset 4"));
    assert_eq!(provider.request_count(), 0);
    assert!(!temp_dir.path().join("notes_es.json").exists());

    Ok(())
}

/// Test empty inputs
#[tokio::test]
async fn test_translateFile_withEmptyOrValuelessFile_shouldReportEmptyFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let empty = common::create_test_file(temp_dir.path(), "empty.json", "")?;
    let numbers = common::create_test_file(temp_dir.path(), "numbers.json", r#"{"a": 1, "b": [2, 3]}"#)?;
    let pipeline = common::test_pipeline(MockProvider::working(), common::memory_store(), 5000);

    for input in [empty, numbers] {
        let error = pipeline
            .try_translate_file(&input, temp_dir.path())
            .await
            .expect_err("nothing to translate must fail");
        assert!(matches!(error, TranslationError::EmptyFile(_)));
    }

    Ok(())
}

/// Test that an existing output file is replaced, not appended to
#[tokio::test]
async fn test_translateFile_withExistingOutput_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "greeting.json", common::GREETING_JSON)?;
    let stale = common::create_test_file(
        temp_dir.path(),
        "greeting_es.json",
        "stale content that is longer than the translated document",
    )?;
    let pipeline = common::test_pipeline(common::greeting_provider(), common::memory_store(), 5000);

    let result = pipeline.translate_file(&input, temp_dir.path()).await;

    assert!(result.success);
    assert_eq!(fs::read_to_string(stale)?, r#"{"a": "Hola", "b": 5, "c": "Mundo"}"#);

    Ok(())
}

/// Test that a second run is served from the cache
#[tokio::test]
async fn test_translateFile_twice_shouldHitCacheOnSecondRun() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "greeting.json", common::GREETING_JSON)?;
    let provider = common::greeting_provider();
    let pipeline = common::test_pipeline(provider.clone(), common::memory_store(), 5000);

    assert!(pipeline.translate_file(&input, temp_dir.path()).await.success);
    assert!(pipeline.translate_file(&input, temp_dir.path()).await.success);

    assert_eq!(provider.request_count(), 1);
    assert_eq!(pipeline.client().rate_limiter().available_requests()?, 99);

    Ok(())
}

/// Test that a provider failure aborts the file
#[tokio::test]
async fn test_translateFile_withFailingProvider_shouldReportProviderError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "greeting.json", common::GREETING_JSON)?;
    let pipeline = common::test_pipeline(MockProvider::failing(), common::memory_store(), 5000);

    let result = pipeline.translate_file(&input, temp_dir.path()).await;

    assert!(!result.success);
    assert!(result.output_path.is_none());
    assert!(result.error_message.unwrap_or_default().contains("Simulated provider failure"));

    Ok(())
}
