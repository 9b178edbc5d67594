use anyhow::{anyhow, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{Config, ProviderKind};
use crate::database::KeyValueStore;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::google::GoogleTranslate;
use crate::providers::mock::MockProvider;
use crate::providers::TranslationProvider;
use crate::translation::{
    FileTranslationPipeline, FileTranslationResult, PipelineOptions, RateLimiter,
    TranslationCache, TranslationClient,
};

// @module: Application controller for multi-file translation runs

/// Status shown when the selection holds no documents
pub const NO_FILES_MESSAGE: &str = "No JSON files selected!";

/// Status shown when every file was translated
pub const FINISHED_MESSAGE: &str = "Finished translation!";

/// Outcome of one run over the selected files
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One entry per attempted file, in selection order
    pub results: Vec<FileTranslationResult>,
    /// Files not attempted because an earlier one failed
    pub skipped: usize,
    pub finished_with_errors: bool,
}

impl BatchReport {
    /// Message of the most recent failure
    pub fn last_error(&self) -> Option<&str> {
        self.results
            .iter()
            .rev()
            .find_map(|r| r.error_message.as_deref())
    }

    /// Number of files written
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Aggregate status line for the run
    pub fn status_message(&self) -> String {
        match (self.finished_with_errors, self.last_error()) {
            (true, Some(error)) => format!("Finished with errors: {}", error),
            (true, None) => "Finished with errors".to_string(),
            (false, _) => FINISHED_MESSAGE.to_string(),
        }
    }
}

/// Main application controller for JSON translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Backing store of the cache and request log
    store: Arc<dyn KeyValueStore>,
    // @field: Translation backend
    provider: Arc<dyn TranslationProvider>,
}

impl Controller {
    // @method: Create a controller using the provider named in the configuration
    pub fn with_config(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let provider: Arc<dyn TranslationProvider> = match config.translation.provider {
            ProviderKind::Google => Arc::new(
                GoogleTranslate::new(
                    config.translation.endpoint.clone(),
                    config.translation.timeout_secs,
                )
                .context("Failed to create Google Translate client")?,
            ),
            ProviderKind::Mock => Arc::new(MockProvider::working()),
        };
        let kind = config.translation.provider;
        debug!("Using provider {} ({})", kind, kind.display_name());

        Ok(Self::with_provider(config, store, provider))
    }

    /// Create a controller around an explicit provider
    pub fn with_provider(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        provider: Arc<dyn TranslationProvider>,
    ) -> Self {
        Self {
            config,
            store,
            provider,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Request log view of the shared store
    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(
            self.store.clone(),
            self.config.rate_limit.window_secs,
            self.config.rate_limit.max_requests,
        )
    }

    /// Requests left in the current window
    pub fn quota(&self) -> Result<u32> {
        self.rate_limiter().available_requests()
    }

    /// Build the single-file pipeline for this configuration
    pub fn pipeline(&self) -> FileTranslationPipeline {
        let client = TranslationClient::new(
            self.provider.clone(),
            TranslationCache::new(self.store.clone(), self.config.translation.cache_enabled),
            self.rate_limiter(),
        );
        FileTranslationPipeline::new(client, PipelineOptions::from_config(&self.config))
    }

    /// Translate every document in `inputs` into `output_dir`.
    ///
    /// Files run one at a time in selection order, paced by the configured
    /// file delay. The run stops at the first file that fails.
    pub async fn run<P: AsRef<Path>>(&self, inputs: &[P], output_dir: &Path) -> Result<BatchReport> {
        let start_time = Instant::now();

        let files = FileManager::collect_inputs(inputs)?;
        if files.is_empty() {
            return Err(anyhow!(NO_FILES_MESSAGE));
        }

        FileManager::ensure_dir(output_dir)?;

        info!(
            "{}: {} file(s), {} -> {}",
            self.provider.name(),
            files.len(),
            Self::language_label(&self.config.source_language),
            Self::language_label(&self.config.target_language)
        );

        let multi_progress = MultiProgress::new();
        let files_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        files_pb.set_style(Self::progress_style("files"));

        let batches_pb = multi_progress.add(ProgressBar::new(0));
        batches_pb.set_style(Self::progress_style("batches"));

        let progress_pb = batches_pb.clone();
        let pipeline = self.pipeline().with_progress(Arc::new(move |done, total| {
            progress_pb.set_length(total as u64);
            progress_pb.set_position(done as u64);
        }));

        let mut report = BatchReport::default();
        let file_delay = self.config.file_delay();

        for (index, file) in files.iter().enumerate() {
            if index > 0 && !file_delay.is_zero() {
                tokio::time::sleep(file_delay).await;
            }

            files_pb.set_message(Self::display_name(file));
            batches_pb.reset();

            let result = pipeline.translate_file(file, output_dir).await;
            let failed = !result.success;
            report.results.push(result);
            files_pb.inc(1);

            if failed {
                report.finished_with_errors = true;
                report.skipped = files.len() - index - 1;
                if report.skipped > 0 {
                    warn!("Stopping after failure, {} file(s) not translated", report.skipped);
                }
                break;
            }
        }

        batches_pb.finish_and_clear();
        files_pb.finish_and_clear();

        let cache = pipeline.client().cache();
        if cache.is_enabled() {
            let (hits, misses, rate) = cache.stats();
            debug!("Cache: {} hits, {} misses ({:.1}% hit rate)", hits, misses, rate * 100.0);
        }

        info!(
            "{} of {} file(s) translated in {}",
            report.succeeded(),
            files.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(report)
    }

    /// English name of a language code, falling back to the code itself
    fn language_label(code: &str) -> String {
        language_utils::get_language_name(code).unwrap_or_else(|_| code.to_string())
    }

    fn progress_style(unit: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} {{msg}}",
                unit
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Output path `input` would be written to
    pub fn output_path_for(&self, input: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(input, output_dir, &self.config.output_suffix)
    }
}
