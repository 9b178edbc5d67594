/*!
 * Error types for the jsonbabel application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with translation providers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that abort the translation of a single file
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The input file is empty or holds nothing to translate
    #[error("File is empty or has no translatable values: {0}")]
    EmptyFile(PathBuf),

    /// The input file could not be read
    #[error("Failed to read {path}: {message}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying cause
        message: String,
    },

    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A single value cannot fit into one request
    #[error("Value #{index} is {length} characters long, over the request limit of {limit}")]
    ValueTooLong {
        /// Position of the value in document order
        index: usize,
        /// Length of the value in characters
        length: usize,
        /// Configured request limit
        limit: usize,
    },

    /// The document contains an escaped quote, which cannot survive batching
    #[error("Escaped quote at byte offset {offset} is not supported")]
    UnsupportedEscape {
        /// Byte offset of the escaped quote
        offset: usize,
    },

    /// Translated segment count does not match the values sent
    #[error("Expected {expected} translated segments but received {actual}")]
    Splice {
        /// Number of values sent
        expected: usize,
        /// Number of segments received
        actual: usize,
    },

    /// The output file could not be written
    #[error("Failed to write {path}: {message}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying cause
        message: String,
    },
}
