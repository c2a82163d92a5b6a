// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, TranslationProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod listing;
mod providers;
mod translation;
mod xcstrings;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    OpenAI,
    Anthropic,
    Gemini,
    Azure,
    Github,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
            CliTranslationProvider::Azure => TranslationProvider::Azure,
            CliTranslationProvider::Github => TranslationProvider::GitHubModels,
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

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate missing entries of a string catalog (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Test the connection to the configured provider
    TestConnection {
        /// Configuration file path
        #[arg(short, long, default_value = "locforge.json")]
        config_path: String,
    },

    /// Generate shell completions for locforge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input .xcstrings catalog file
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Write translations back into the input file instead of a copy
    #[arg(short, long)]
    in_place: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the provider (overrides the config file)
    #[arg(short = 'k', long, env = "LOCFORGE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Target language codes, comma separated (e.g. 'fr,de,zh-Hans')
    #[arg(short = 't', long, value_delimiter = ',')]
    target_languages: Vec<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "locforge.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// LocForge - LLM-powered localization for string catalogs
///
/// Translates the missing entries of an Xcode .xcstrings catalog into
/// your target languages using LLM providers (OpenAI, Anthropic, Gemini,
/// Azure OpenAI, GitHub Models).
#[derive(Parser, Debug)]
#[command(name = "locforge")]
#[command(version = "1.0.0")]
#[command(about = "LLM-powered string catalog translation tool")]
#[command(long_about = "LocForge reads an Xcode .xcstrings catalog, finds entries that still lack
translations in your target languages, and fills them in using an LLM provider.

EXAMPLES:
    locforge Localizable.xcstrings                      # Translate using default config
    locforge -i Localizable.xcstrings                   # Update the catalog in place
    locforge -p anthropic -m claude-3-5-haiku-latest Localizable.xcstrings
    locforge -t fr,de,ja Localizable.xcstrings          # Override target languages
    locforge --log-level debug Localizable.xcstrings    # Verbose logging
    locforge test-connection                            # Verify provider credentials
    locforge completions bash > locforge.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in locforge.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

SUPPORTED PROVIDERS:
    openai    - OpenAI API (default: gpt-4o-mini)
    anthropic - Anthropic Claude API (default: claude-3-5-haiku-latest)
    gemini    - Google Gemini API (default: gemini-2.0-flash)
    azure     - Azure OpenAI deployment (requires endpoint)
    github    - GitHub Models (OpenAI-compatible)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .xcstrings catalog file
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Write translations back into the input file instead of a copy
    #[arg(short, long)]
    in_place: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the provider (overrides the config file)
    #[arg(short = 'k', long, env = "LOCFORGE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Target language codes, comma separated (e.g. 'fr,de,zh-Hans')
    #[arg(short = 't', long, value_delimiter = ',')]
    target_languages: Vec<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "locforge.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "locforge", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::TestConnection { config_path }) => {
            let mut config = Config::from_file_or_default(&config_path)?;
            log::set_max_level(config.log_level.to_level_filter());
            if config.target_languages.is_empty() {
                // test-connection does not need targets; satisfy the controller
                config.target_languages = vec!["fr".to_string()];
            }
            let controller = Controller::with_config(config)?;
            controller.test_connection().await
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                input_path,
                in_place: cli.in_place,
                provider: cli.provider,
                model: cli.model,
                api_key: cli.api_key,
                target_languages: cli.target_languages,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    if !Path::new(&options.config_path).exists() {
        warn!(
            "Config file not found at '{}', creating default config.",
            options.config_path
        );
    }
    let mut config = Config::from_file_or_default(&options.config_path)
        .context("Failed to load configuration")?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        let provider_str = config.provider.to_lowercase_string();
        if let Some(provider_config) = config
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.model = model.clone();
        }
    }

    if let Some(api_key) = &options.api_key {
        let provider_str = config.provider.to_lowercase_string();
        if let Some(provider_config) = config
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.api_key = api_key.clone();
        }
    }

    if !options.target_languages.is_empty() {
        config.target_languages = options.target_languages.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    if !is_catalog_file(&options.input_path) {
        return Err(anyhow!(
            "Input path is not an .xcstrings catalog: {:?}",
            options.input_path
        ));
    }

    let controller = Controller::with_config(config)?;
    let summary = controller
        .run_catalog_translation(&options.input_path, options.in_place)
        .await?;

    if summary.all_failed() {
        return Err(anyhow!(
            "All {} translations failed; output kept source text",
            summary.total
        ));
    }

    Ok(())
}

// Helper function to check if a path is an .xcstrings catalog file
fn is_catalog_file(path: &Path) -> bool {
    file_utils::FileManager::file_exists(path)
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("xcstrings"))
            .unwrap_or(false)
}
