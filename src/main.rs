// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;
use credentials::CredentialStore;

mod app_config;
mod app_controller;
mod credentials;
mod document;
mod errors;
mod extractor;
mod file_utils;
mod generation;
mod pictograms;
mod providers;
mod render;
mod session;

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an easy-read version of a page (default command)
    #[command(alias = "generate")]
    Generate(GenerateArgs),

    /// Generate shell completions for easyread
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input HTML file to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file path (default: next to the input, with .easyread.html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model name to use for generation
    #[arg(short, long)]
    model: Option<String>,

    /// Language code of the page (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    language: Option<String>,

    /// Attribute marking content elements
    #[arg(long)]
    attribute: Option<String>,

    /// Skip pictogram lookup
    #[arg(long)]
    no_pictograms: bool,

    /// API key for the generation service
    #[arg(long, env = "EASYREAD_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// easyread - Easy-read page generation with AI
///
/// Turns the tagged text of an HTML page into an easy-read version with
/// short sentences and one pictogram per sentence.
#[derive(Parser, Debug)]
#[command(name = "easyread")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered easy-read page generation")]
#[command(long_about = "easyread extracts the tagged text of an HTML page, simplifies it with an \
AI model, and renders an easy-read page with one pictogram per sentence.

EXAMPLES:
    easyread article.html                      # Generate using default config
    easyread -f article.html                   # Force overwrite existing output
    easyread -m gpt-4o article.html            # Use a specific model
    easyread -l es article.html                # Spanish page and pictograms
    easyread --no-pictograms article.html      # Skip pictogram lookup
    easyread --log-level debug article.html    # Verbose logging
    easyread completions bash > easyread.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

API KEY:
    The generation API key is taken from --api-key or EASYREAD_API_KEY when
    set; otherwise it is asked for once and remembered under the user config
    directory.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input HTML file to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file path (default: next to the input, with .easyread.html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model name to use for generation
    #[arg(short, long)]
    model: Option<String>,

    /// Language code of the page (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    language: Option<String>,

    /// Attribute marking content elements
    #[arg(long)]
    attribute: Option<String>,

    /// Skip pictogram lookup
    #[arg(long)]
    no_pictograms: bool,

    /// API key for the generation service
    #[arg(long, env = "EASYREAD_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
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

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

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

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "easyread", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let generate_args = GenerateArgs {
                input_path,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                model: cli.model,
                language: cli.language,
                attribute: cli.attribute,
                no_pictograms: cli.no_pictograms,
                api_key: cli.api_key,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(generate_args).await
        }
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    if !Path::new(config_path).exists() {
        warn!("Config file not found at '{}', creating default config.", config_path);
    }
    let mut config = Config::from_file_or_create(config_path)?;

    // Override config with CLI options if provided
    if let Some(model) = &options.model {
        config.generation.model = model.clone();
    }
    if let Some(language) = &options.language {
        config.language = language.clone();
    }
    if let Some(attribute) = &options.attribute {
        config.extraction.attribute = attribute.clone();
    }
    if options.no_pictograms {
        config.pictograms.enabled = false;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Resolve the API key: CLI/env first, then config, then the stored key
    // (asking once when nothing is stored yet)
    let api_key = match options.api_key {
        Some(key) => key,
        None if !config.generation.api_key.is_empty() => config.generation.api_key.clone(),
        None => CredentialStore::default_location()?.load_or_prompt()?,
    };

    // Create controller and run the generation
    let controller = Controller::with_config(config, api_key)?;
    controller
        .run(options.input_path, options.output, options.force_overwrite)
        .await
}
