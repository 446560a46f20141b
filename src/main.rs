// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use appfont::app_config::{self, Config, InstallEnvironment};
use appfont::Controller;

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
    /// Install the font and icon map (default command)
    Install {
        /// Script whose icon map region should be replaced
        #[arg(value_name = "SCRIPT_PATH")]
        script: Option<PathBuf>,

        /// Do not reload sketchybar afterwards
        #[arg(long)]
        no_reload: bool,
    },

    /// Render the glyph table into the dist icon_map.sh
    Build,

    /// Print the icon map fragment to stdout
    Print,

    /// Generate shell completions for appfont
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// appfont - sketchybar app icon font installer
#[derive(Parser, Debug)]
#[command(name = "appfont")]
#[command(version)]
#[command(about = "Install the sketchybar app icon font and icon map")]
#[command(long_about = "Installs the app icon font and the __icon_map shell helper.

EXAMPLES:
    appfont                                     # Install font and ~/.config/sketchybar/icon_map.sh
    appfont install ~/.config/sketchybar/plugins/space.sh
                                                # Replace the icon map region in a script
    appfont install --no-reload                 # Install without reloading sketchybar
    appfont build --table icons.json            # Regenerate dist/icon_map.sh from a table
    appfont completions zsh > _appfont          # Generate zsh completions

MARKERS:
    A patched script must contain the lines
        ### START-OF-ICON-MAP
        ### END-OF-ICON-MAP
    Everything between them, markers included, is replaced.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "appfont.json", global = true)]
    config_path: PathBuf,

    /// Directory holding the packaged font and icon map
    #[arg(short, long, global = true)]
    dist: Option<PathBuf>,

    /// JSON glyph table to use instead of the built-in one
    #[arg(short, long, global = true)]
    table: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Info until the config says otherwise
    if CustomLogger::init(LevelFilter::Info).is_err() {
        eprintln!("Failed to initialize logger");
    }

    let cli = CommandLineOptions::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "appfont", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.into());
    }

    let mut config = Config::load_or_default(&cli.config_path)?;

    // Override config with CLI options if provided
    if let Some(dist) = &cli.dist {
        config.dist_dir = dist.clone();
    }
    if let Some(table) = &cli.table {
        config.table_path = Some(table.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.clone().into());
    }

    let env = InstallEnvironment::detect()?;
    let controller = Controller::with_config(config, env);

    match cli.command {
        Some(Commands::Build) => {
            controller.build_dist()?;
        }
        Some(Commands::Print) => {
            let fragment = controller.build_fragment()?;
            println!("{}", fragment);
        }
        Some(Commands::Install { script, no_reload }) => {
            install(&controller, script, no_reload)?;
        }
        None => {
            install(&controller, None, false)?;
        }
        // Handled before the config is loaded
        Some(Commands::Completions { .. }) => {}
    }

    Ok(())
}

fn install(controller: &Controller, script: Option<PathBuf>, no_reload: bool) -> Result<()> {
    let reload = controller.config().reload.enabled && !no_reload;
    let report = controller
        .install(script.as_deref(), reload)
        .context("Installation failed")?;

    info!(
        "Done: font {:?}, icon map {:?}{}",
        report.font_path,
        report.icon_map.path(),
        if report.reloaded { ", sketchybar reloaded" } else { "" }
    );

    Ok(())
}
