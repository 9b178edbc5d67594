/*!
 * Substitution of translated values back into the document.
 *
 * Spans carry offsets into the original text. The new document is built in
 * one pass: copy the untouched range before each span, then its replacement.
 * The cumulative length change of earlier replacements gives where each
 * span lands in the output.
 */

use crate::errors::TranslationError;

use super::scanner::ValueSpan;

/// Rewrites a document with translated values
pub struct ResponseSplicer;

impl ResponseSplicer {
    /// Replace each span of `document` with the translation at the same index.
    ///
    /// `translations` must hold exactly one entry per span. An empty
    /// translation still consumes its slot and leaves an empty value.
    pub fn splice(
        document: &str,
        spans: &[ValueSpan],
        translations: &[String],
    ) -> Result<String, TranslationError> {
        if translations.len() != spans.len() {
            return Err(TranslationError::Splice {
                expected: spans.len(),
                actual: translations.len(),
            });
        }

        let grown: usize = translations.iter().map(String::len).sum();
        let mut output = String::with_capacity(document.len() + grown);
        let mut cursor = 0;
        // output length minus input length consumed so far
        let mut delta: isize = 0;

        for (span, translated) in spans.iter().zip(translations) {
            // spans come from the scanner in strictly increasing order
            debug_assert!(span.start >= cursor && span.end >= span.start);
            output.push_str(&document[cursor..span.start]);
            debug_assert_eq!(output.len(), span.start.saturating_add_signed(delta));
            output.push_str(translated);
            delta += translated.len() as isize - (span.end - span.start) as isize;
            cursor = span.end;
        }
        output.push_str(&document[cursor..]);

        Ok(output)
    }
}
