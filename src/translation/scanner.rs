/*!
 * String value scanning over raw JSON text.
 *
 * The scanner never parses the document. It walks the raw text looking for
 * quote pairs and keeps the ones whose opening quote follows a `:`, so the
 * caller can substitute translations without disturbing formatting, key
 * order or non-string values.
 */

use crate::errors::TranslationError;

/// A translatable string value located in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpan {
    /// Byte offset of the first character after the opening quote
    pub start: usize,
    /// Byte offset of the closing quote
    pub end: usize,
    /// The value text between the quotes
    pub text: String,
}

impl ValueSpan {
    /// Length of the value in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Locates string values (not keys) in raw JSON text
pub struct ValueScanner;

impl ValueScanner {
    /// Scan `document` and return its non-empty string values in document order.
    ///
    /// Every quote pair is tracked so that key contents never open a value.
    /// A quote preceded by an odd run of backslashes is escaped and never
    /// opens or closes a pair. Run [`ValueScanner::check_supported`] on the
    /// document before substituting anything.
    pub fn scan(document: &str) -> Vec<ValueSpan> {
        let bytes = document.as_bytes();
        let mut spans = Vec::new();
        // (content start, opened after a colon)
        let mut open: Option<(usize, bool)> = None;

        // '"' is ASCII, so it never appears inside a multi-byte UTF-8 sequence
        for (i, &byte) in bytes.iter().enumerate() {
            if byte != b'"' || Self::is_escaped(bytes, i) {
                continue;
            }

            match open {
                None => open = Some((i + 1, Self::follows_colon(bytes, i))),
                Some((start, is_value)) => {
                    if is_value && i > start {
                        spans.push(ValueSpan {
                            start,
                            end: i,
                            text: document[start..i].to_string(),
                        });
                    }
                    open = None;
                }
            }
        }

        spans
    }

    /// Reject documents containing an escaped quote, in a key or a value.
    ///
    /// Batches are joined and split on `"`, so an escaped quote inside a value
    /// would shift every later segment. The offset is that of the quote.
    pub fn check_supported(document: &str) -> Result<(), TranslationError> {
        let bytes = document.as_bytes();
        match (0..bytes.len()).find(|&i| bytes[i] == b'"' && Self::is_escaped(bytes, i)) {
            Some(offset) => Err(TranslationError::UnsupportedEscape { offset }),
            None => Ok(()),
        }
    }

    /// Whether the quote at `quote` follows an odd run of backslashes
    fn is_escaped(bytes: &[u8], quote: usize) -> bool {
        bytes[..quote].iter().rev().take_while(|b| **b == b'\\').count() % 2 == 1
    }

    /// Whether the nearest non-whitespace byte before `quote` is a colon
    fn follows_colon(bytes: &[u8], quote: usize) -> bool {
        bytes[..quote]
            .iter()
            .rev()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b':')
    }
}
