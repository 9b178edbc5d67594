/*!
 * Extraction, translation and reassembly of JSON string values.
 *
 * The submodules follow the data flow of one file:
 *
 * - `scanner`: locates string values (not keys) in raw document text
 * - `batch`: packs values into size-bounded, quote-separated requests
 * - `client`: provider access behind the cache and the request log
 * - `cache`: translations keyed by source text and target language
 * - `rate_limiter`: sliding-window count of recent requests
 * - `splicer`: writes translated values back at their original offsets
 * - `pipeline`: runs one file end-to-end
 */

// Re-export main types for easier usage
pub use self::batch::{Batch, RequestBatcher};
pub use self::cache::TranslationCache;
pub use self::client::TranslationClient;
pub use self::pipeline::{
    FileStage, FileTranslationPipeline, FileTranslationResult, PipelineOptions, ProgressCallback,
};
pub use self::rate_limiter::RateLimiter;
pub use self::scanner::{ValueScanner, ValueSpan};
pub use self::splicer::ResponseSplicer;

// Submodules
pub mod batch;
pub mod cache;
pub mod client;
pub mod pipeline;
pub mod rate_limiter;
pub mod scanner;
pub mod splicer;
