/*!
 * Request batching.
 *
 * Scanned values are packed into quote-separated request strings, each
 * bounded by a character limit. A batch boundary only ever falls between
 * two values, so every value reaches the provider whole.
 */

use crate::errors::TranslationError;

use super::scanner::ValueSpan;

/// Separator placed between values inside one request
pub const SEPARATOR: char = '"';

/// One outbound request's worth of values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Index of the first value of this batch in document order
    pub first_value: usize,
    /// Value texts in document order
    pub texts: Vec<String>,
}

impl Batch {
    /// The text sent to the provider
    pub fn request_text(&self) -> String {
        self.texts.join(&SEPARATOR.to_string())
    }

    /// Length of the request text in characters
    pub fn char_len(&self) -> usize {
        let values: usize = self.texts.iter().map(|t| t.chars().count()).sum();
        values + self.texts.len().saturating_sub(1)
    }

    /// Number of values in this batch
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Split a translated request back into one segment per value.
    ///
    /// Surrounding whitespace of each original value is restored, since
    /// providers tend to pad or strip text around the separators.
    pub fn split_response(&self, translated: &str) -> Result<Vec<String>, TranslationError> {
        let segments: Vec<&str> = translated.split(SEPARATOR).collect();

        if segments.len() != self.texts.len() {
            return Err(TranslationError::Splice {
                expected: self.texts.len(),
                actual: segments.len(),
            });
        }

        Ok(self
            .texts
            .iter()
            .zip(segments)
            .map(|(original, segment)| restore_padding(original, segment))
            .collect())
    }
}

/// Packs scanned values into size-bounded batches
pub struct RequestBatcher;

impl RequestBatcher {
    /// Greedily pack `spans` into batches whose request text is at most
    /// `char_limit` characters.
    ///
    /// A value that is longer than the limit on its own cannot be sent
    /// without cutting it, so the whole file is rejected instead.
    pub fn batch(spans: &[ValueSpan], char_limit: usize) -> Result<Vec<Batch>, TranslationError> {
        let mut batches = Vec::new();
        let mut current = Batch { first_value: 0, texts: Vec::new() };
        let mut current_len = 0;

        for (index, span) in spans.iter().enumerate() {
            let length = span.char_len();
            if length > char_limit {
                return Err(TranslationError::ValueTooLong {
                    index,
                    length,
                    limit: char_limit,
                });
            }

            let separator = usize::from(!current.is_empty());
            if !current.is_empty() && current_len + separator + length > char_limit {
                batches.push(std::mem::replace(
                    &mut current,
                    Batch { first_value: index, texts: Vec::new() },
                ));
                current_len = 0;
            }

            current_len += usize::from(!current.is_empty()) + length;
            current.texts.push(span.text.clone());
        }

        if !current.is_empty() {
            batches.push(current);
        }

        Ok(batches)
    }
}

/// Re-apply the leading and trailing whitespace of `original` to `translated`
fn restore_padding(original: &str, translated: &str) -> String {
    let leading = &original[..original.len() - original.trim_start().len()];
    let trailing = &original[original.trim_end().len()..];

    if original.trim().is_empty() {
        return translated.to_string();
    }

    format!("{}{}{}", leading, translated.trim(), trailing)
}
