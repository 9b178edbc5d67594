/*!
 * Tests for scanning, batching and splicing across varied documents
 */

use anyhow::Result;

use jsonbabel::errors::TranslationError;
use jsonbabel::translation::{RequestBatcher, ResponseSplicer, ValueScanner};

const DOCUMENTS: &[&str] = &[
    r#"{"a": "Hello", "b": 5, "c": "World"}"#,
    "{\n  \"title\": \"Main menu\",\n  \"items\": {\n    \"start\": \"Start\",\n    \"options\": \"Options\"\n  },\n  \"count\": 3\n}\n",
    r#"{"k:1":"v1","k2" :"v2","k3":	"tab value","flag":true,"n":null}"#,
    r#"{"greeting": "¡Hola, señor!", "emoji": "🙂 ok", "empty": ""}"#,
    r#"["just", "an", "array"]"#,
    "",
];

/// Test that spans only ever cover the text between a value's quotes
#[test]
fn test_scan_acrossDocuments_shouldYieldOrderedDisjointValueSpans() {
    for document in DOCUMENTS {
        let spans = ValueScanner::scan(document);
        let mut previous_end = 0;

        for span in &spans {
            assert!(span.start >= previous_end, "overlap in {}", document);
            assert!(span.end > span.start, "empty span in {}", document);
            assert_eq!(&document[span.start..span.end], span.text);
            assert_eq!(&document[span.start - 1..span.start], "\"");
            assert_eq!(&document[span.end..span.end + 1], "\"");
            assert!(!span.text.contains('"'));
            previous_end = span.end;
        }
    }
}

/// Test that splicing the original texts back reproduces every document
#[test]
fn test_splice_withOriginalTexts_shouldRoundTripEveryDocument() -> Result<()> {
    for document in DOCUMENTS {
        let spans = ValueScanner::scan(document);
        let originals: Vec<String> = spans.iter().map(|s| s.text.clone()).collect();

        assert_eq!(ResponseSplicer::splice(document, &spans, &originals)?, *document);
    }

    Ok(())
}

/// Test the batching bounds for a range of limits
#[test]
fn test_batch_acrossLimits_shouldRespectLimitAndReconstruct() -> Result<()> {
    let document = DOCUMENTS[1];
    let spans = ValueScanner::scan(document);
    let longest = spans.iter().map(|s| s.char_len()).max().unwrap_or(0);
    let joined: Vec<String> = spans.iter().map(|s| s.text.clone()).collect();

    for limit in longest..longest + 30 {
        let batches = RequestBatcher::batch(&spans, limit)?;

        for batch in &batches {
            assert!(batch.char_len() <= limit, "limit {} exceeded", limit);
            assert_eq!(batch.request_text().chars().count(), batch.char_len());
        }

        let rebuilt: Vec<String> = batches.iter().flat_map(|b| b.texts.clone()).collect();
        assert_eq!(rebuilt, joined);

        let firsts: Vec<usize> = batches.iter().map(|b| b.first_value).collect();
        let mut expected_first = 0;
        for (batch, first) in batches.iter().zip(firsts) {
            assert_eq!(first, expected_first);
            expected_first += batch.len();
        }
    }

    Ok(())
}

/// Test that an oversized value names its position
#[test]
fn test_batch_withOversizedValue_shouldReportIndex() {
    let document = r#"{"a": "ok", "b": "this one is far too long"}"#;
    let spans = ValueScanner::scan(document);

    match RequestBatcher::batch(&spans, 10) {
        Err(TranslationError::ValueTooLong { index, length, limit }) => {
            assert_eq!(index, 1);
            assert_eq!(length, 24);
            assert_eq!(limit, 10);
        }
        other => panic!("expected ValueTooLong, got {:?}", other),
    }
}

/// Test a full translate-by-hand pass through batch splitting and splicing
#[test]
fn test_splitAndSplice_withTranslatedBatches_shouldRewriteValues() -> Result<()> {
    let document = r#"{"a": "one", "b": "two", "c": "three"}"#;
    let spans = ValueScanner::scan(document);
    let batches = RequestBatcher::batch(&spans, 8)?;

    let mut translations = Vec::new();
    for batch in &batches {
        let response = batch.request_text().to_uppercase();
        translations.extend(batch.split_response(&response)?);
    }

    assert_eq!(
        ResponseSplicer::splice(document, &spans, &translations)?,
        r#"{"a": "ONE", "b": "TWO", "c": "THREE"}"#
    );

    Ok(())
}

/// Test that an escaped quote in a key neither shifts the pairs nor passes the check
#[test]
fn test_scan_withEscapedQuoteInKey_shouldStayAlignedAndBeRejected() {
    let document = r#"{"a\"b": "x", "label": "Note:", "k": "v"}"#;
    let spans = ValueScanner::scan(document);

    let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["x", "Note:", "v"]);
    assert!(spans.iter().all(|s| !s.text.contains(',')));

    assert!(matches!(
        ValueScanner::check_supported(document),
        Err(TranslationError::UnsupportedEscape { offset: 4 })
    ));
}

/// Test that the check accepts documents whose backslashes are all escaped
#[test]
fn test_checkSupported_acrossDocuments_shouldAcceptPlainText() {
    for document in DOCUMENTS {
        assert!(ValueScanner::check_supported(document).is_ok(), "{}", document);
    }
    assert!(ValueScanner::check_supported(r#"{"dir\\": "C:\\temp\\"}"#).is_ok());
}
