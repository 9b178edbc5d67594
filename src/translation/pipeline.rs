/*!
 * Single-file translation pipeline.
 *
 * One document goes through `Reading -> Scanning -> Batching ->
 * Translating(i of N) -> Splicing -> Writing`, ending in `Done` or `Failed`.
 * Any failure stops the file right away: the remaining batches are not sent
 * and no output is written.
 */

use log::{debug, error, info};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::file_utils::FileManager;

use super::batch::{Batch, RequestBatcher};
use super::client::TranslationClient;
use super::scanner::{ValueScanner, ValueSpan};
use super::splicer::ResponseSplicer;

/// Where a file currently is in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStage {
    Idle,
    Reading,
    Scanning,
    Batching,
    /// Sending batch `batch` (1-based) of `total`
    Translating { batch: usize, total: usize },
    Splicing,
    Writing,
    Done,
    Failed,
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Reading => write!(f, "reading"),
            Self::Scanning => write!(f, "scanning"),
            Self::Batching => write!(f, "batching"),
            Self::Translating { batch, total } => write!(f, "translating {} of {}", batch, total),
            Self::Splicing => write!(f, "splicing"),
            Self::Writing => write!(f, "writing"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileTranslationResult {
    /// Input document
    pub input: PathBuf,
    /// Written document, set on success
    pub output_path: Option<PathBuf>,
    pub success: bool,
    /// Rendered error, set on failure
    pub error_message: Option<String>,
}

impl FileTranslationResult {
    fn succeeded(input: &Path, output_path: PathBuf) -> Self {
        Self {
            input: input.to_path_buf(),
            output_path: Some(output_path),
            success: true,
            error_message: None,
        }
    }

    fn failed(input: &Path, error: &TranslationError) -> Self {
        Self {
            input: input.to_path_buf(),
            output_path: None,
            success: false,
            error_message: Some(error.to_string()),
        }
    }
}

/// Per-run pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub source_language: String,
    pub target_language: String,
    pub output_suffix: String,
    /// Maximum request length in characters
    pub char_limit: usize,
    /// Pause between two requests of the same file
    pub request_delay: Duration,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            output_suffix: config.output_suffix.clone(),
            char_limit: config.translation.max_chars_per_request,
            request_delay: config.request_delay(),
        }
    }
}

/// Called with `(completed_batches, total_batches)` after each batch
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Translates one document at a time
#[derive(Clone)]
pub struct FileTranslationPipeline {
    client: TranslationClient,
    options: PipelineOptions,
    progress: Option<ProgressCallback>,
}

impl FileTranslationPipeline {
    pub fn new(client: TranslationClient, options: PipelineOptions) -> Self {
        Self {
            client,
            options,
            progress: None,
        }
    }

    /// Report batch progress through `callback`
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn client(&self) -> &TranslationClient {
        &self.client
    }

    /// Output location of `input` under `output_dir`
    pub fn output_path(&self, input: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(input, output_dir, &self.options.output_suffix)
    }

    /// Translate `input` into `output_dir`, reporting the outcome
    pub async fn translate_file(&self, input: &Path, output_dir: &Path) -> FileTranslationResult {
        match self.try_translate_file(input, output_dir).await {
            Ok(output_path) => {
                self.enter(input, FileStage::Done);
                info!("Success: {}", output_path.display());
                FileTranslationResult::succeeded(input, output_path)
            }
            Err(e) => {
                self.enter(input, FileStage::Failed);
                error!("Failed to translate {}: {}", input.display(), e);
                FileTranslationResult::failed(input, &e)
            }
        }
    }

    /// Translate `input` into `output_dir` and return the written path
    pub async fn try_translate_file(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, TranslationError> {
        self.enter(input, FileStage::Reading);
        let document = FileManager::read_to_string(input).map_err(|e| TranslationError::Read {
            path: input.to_path_buf(),
            message: format!("{:#}", e),
        })?;

        if document.trim().is_empty() {
            return Err(TranslationError::EmptyFile(input.to_path_buf()));
        }

        self.enter(input, FileStage::Scanning);
        ValueScanner::check_supported(&document)?;
        let spans = ValueScanner::scan(&document);
        if spans.is_empty() {
            return Err(TranslationError::EmptyFile(input.to_path_buf()));
        }

        let translated = self.translate_spans(input, &document, &spans).await?;

        self.enter(input, FileStage::Writing);
        let output_path = self.output_path(input, output_dir);
        FileManager::write_to_file(&output_path, &translated).map_err(|e| {
            TranslationError::Write {
                path: output_path.clone(),
                message: format!("{:#}", e),
            }
        })?;

        Ok(output_path)
    }

    /// Translate every value of `document` and return the rewritten text.
    ///
    /// A document without translatable values is returned unchanged.
    pub async fn translate_document(&self, document: &str) -> Result<String, TranslationError> {
        ValueScanner::check_supported(document)?;
        let spans = ValueScanner::scan(document);
        self.translate_spans(Path::new("<memory>"), document, &spans).await
    }

    async fn translate_spans(
        &self,
        input: &Path,
        document: &str,
        spans: &[ValueSpan],
    ) -> Result<String, TranslationError> {
        self.enter(input, FileStage::Batching);
        let batches = RequestBatcher::batch(spans, self.options.char_limit)?;

        let translations = self.translate_batches(input, &batches).await?;

        self.enter(input, FileStage::Splicing);
        ResponseSplicer::splice(document, spans, &translations)
    }

    async fn translate_batches(
        &self,
        input: &Path,
        batches: &[Batch],
    ) -> Result<Vec<String>, TranslationError> {
        let total = batches.len();
        let mut translations = Vec::with_capacity(batches.iter().map(Batch::len).sum());

        for (index, batch) in batches.iter().enumerate() {
            if index > 0 && !self.options.request_delay.is_zero() {
                tokio::time::sleep(self.options.request_delay).await;
            }

            self.enter(input, FileStage::Translating { batch: index + 1, total });
            let segments = self
                .client
                .translate_checked(
                    &self.options.source_language,
                    &self.options.target_language,
                    &batch.request_text(),
                    |reply| batch.split_response(reply),
                )
                .await?;

            translations.extend(segments);

            if let Some(progress) = &self.progress {
                progress(index + 1, total);
            }
        }

        Ok(translations)
    }

    fn enter(&self, input: &Path, stage: FileStage) {
        debug!("{}: {}", input.display(), stage);
    }
}
