/*!
 * # jsonbabel - machine translation of JSON string tables
 *
 * A Rust library for translating the string values of JSON resource files
 * (game or app string tables) while leaving everything else byte-for-byte
 * intact: keys, numbers, key order, whitespace.
 *
 * ## Features
 *
 * - Value extraction straight from the document text, no parse/re-serialize
 * - Size-bounded request batching that never cuts inside a value
 * - Translation cache and sliding-window request accounting on a pluggable
 *   key/value store (SQLite or in-memory)
 * - Google `translate_a/single` provider and a deterministic mock provider
 * - Sequential multi-file runs with pacing and stop-at-first-failure
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: the extraction/translation engine:
 *   - `translation::scanner`: string value discovery
 *   - `translation::batch`: request batching
 *   - `translation::client`: cached, accounted provider access
 *   - `translation::rate_limiter`: sliding-window quota
 *   - `translation::splicer`: reassembly of the document
 *   - `translation::pipeline`: one file end-to-end
 * - `database`: key/value storage behind the cache and request log
 * - `providers`: translation provider clients
 * - `file_utils`: File system operations
 * - `app_controller`: Multi-file runs and quota display
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{BatchReport, Controller};
pub use database::{KeyValueStore, MemoryStore, SqliteStore};
pub use errors::{ProviderError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match};
pub use translation::{FileTranslationPipeline, FileTranslationResult, TranslationClient};
