// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jsonbabel::app_config::{Config, LogLevel, ProviderKind};
use jsonbabel::app_controller::Controller;
use jsonbabel::database::{KeyValueStore, MemoryStore, SqliteStore};

/// CLI Wrapper for ProviderKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProvider {
    Google,
    Mock,
}

impl From<CliProvider> for ProviderKind {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::Google => ProviderKind::Google,
            CliProvider::Mock => ProviderKind::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate the string values of JSON files
    Translate(TranslateArgs),

    /// Show how many requests are left in the current window
    Quota {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: PathBuf,
    },

    /// Generate shell completions for jsonbabel
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// JSON files or folders (a folder contributes its direct .json files)
    #[arg(value_name = "INPUTS", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Folder receiving the translated files
    #[arg(short, long, value_name = "DIR")]
    output_dir: PathBuf,

    /// Source language code, 'auto' to detect
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'es', 'fr', 'pt-BR')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Text inserted before '.json' in output file names
    #[arg(long)]
    suffix: Option<String>,

    /// Maximum characters per translation request
    #[arg(long)]
    char_limit: Option<usize>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliProvider>,

    /// Do not read or write the translation cache
    #[arg(long)]
    no_cache: bool,

    /// Keep the cache and request log in memory for this run only
    #[arg(long)]
    no_persist: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// jsonbabel - machine translation of JSON string tables
#[derive(Parser, Debug)]
#[command(name = "jsonbabel")]
#[command(version)]
#[command(about = "Translate the string values of JSON files, keeping everything else intact")]
#[command(long_about = "jsonbabel translates the string values of JSON resource files through a
machine translation endpoint. Keys, numbers and formatting are left untouched.

EXAMPLES:
    jsonbabel translate menu.json -o out/              # Translate using default config
    jsonbabel translate strings/ -o out/ -t fr         # Every .json file in a folder, to French
    jsonbabel translate a.json b.json -o out/ --suffix _de -t de
    jsonbabel translate menu.json -o out/ -p mock      # Dry run without network access
    jsonbabel quota                                    # Remaining requests this hour
    jsonbabel completions bash > jsonbabel.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Prefix and ANSI color for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("error:", "1;31"),
            Level::Warn => ("warn: ", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("debug:", "1;36"),
            Level::Trace => ("trace:", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let (prefix, color) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{}{}{}\x1B[0m",
                color,
                prefix,
                if prefix.is_empty() { "" } else { " " },
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through
    // log::set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "jsonbabel", &mut std::io::stdout());
            Ok(())
        }
        Commands::Quota { config_path } => run_quota(&config_path),
        Commands::Translate(args) => run_translate(args).await,
    }
}

/// Load the configuration, creating a default file when missing
fn load_config(config_path: &Path) -> Result<Config> {
    let (config, created) = Config::load_or_create(config_path)?;
    if created {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path.display()
        );
    }
    Ok(config)
}

/// Open the store shared by the cache and the request log
fn open_store(config: &Config, in_memory: bool) -> Result<Arc<dyn KeyValueStore>> {
    if in_memory {
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = match &config.storage.database_path {
        Some(path) => SqliteStore::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?,
        None => SqliteStore::open_default().context("Failed to open default database")?,
    };
    Ok(Arc::new(store))
}

fn run_quota(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config.clone(), open_store(&config, false)?)?;
    let remaining = controller.quota()?;

    println!(
        "{} of {} requests available in the current window",
        remaining, config.rate_limit.max_requests
    );
    Ok(())
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let mut config = load_config(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(suffix) = &options.suffix {
        config.output_suffix = suffix.clone();
    }
    if let Some(char_limit) = options.char_limit {
        config.translation.max_chars_per_request = char_limit;
    }
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if options.no_cache {
        config.translation.cache_enabled = false;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    let store = open_store(&config, options.no_persist)?;
    let controller = Controller::with_config(config, store)?;

    let report = controller.run(options.inputs.as_slice(), &options.output_dir).await?;
    let status = report.status_message();

    match controller.quota() {
        Ok(remaining) => info!("Requests available this window: {}", remaining),
        Err(e) => warn!("Failed to read request log: {}", e),
    }

    if report.finished_with_errors {
        return Err(anyhow!(status));
    }

    info!("{}", status);
    Ok(())
}
