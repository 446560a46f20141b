use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use log::debug;

use crate::errors::{InstallError, InstallResult};

/// Application configuration module
/// This module handles the installer configuration including loading,
/// validating and saving settings, plus the process environment that
/// is resolved once at startup.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the packaged font and default fragment
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// File name of the packaged font inside `dist_dir`
    #[serde(default = "default_font_file_name")]
    pub font_file_name: String,

    /// File name of the packaged default fragment inside `dist_dir`
    #[serde(default = "default_fragment_file_name")]
    pub fragment_file_name: String,

    /// Optional JSON glyph table; the built-in table is used when absent
    #[serde(default)]
    pub table_path: Option<PathBuf>,

    /// Marker config
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Status bar reload settings
    #[serde(default)]
    pub reload: ReloadConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Sentinel lines delimiting the machine-managed region of a script
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MarkerConfig {
    #[serde(default = "default_start_marker")]
    pub start: String,

    #[serde(default = "default_end_marker")]
    pub end: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            start: default_start_marker(),
            end: default_end_marker(),
        }
    }
}

/// Status bar reload configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReloadConfig {
    /// Whether to reload the status bar after installing
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Program and arguments to run
    #[serde(default = "default_reload_command")]
    pub command: Vec<String>,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_reload_command(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

pub const START_MARKER: &str = "### START-OF-ICON-MAP";
pub const END_MARKER: &str = "### END-OF-ICON-MAP";

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_font_file_name() -> String {
    "sketchybar-app-font.ttf".to_string()
}

fn default_fragment_file_name() -> String {
    "icon_map.sh".to_string()
}

fn default_start_marker() -> String {
    START_MARKER.to_string()
}

fn default_end_marker() -> String {
    END_MARKER.to_string()
}

fn default_reload_command() -> Vec<String> {
    vec!["sketchybar".to_string(), "--reload".to_string()]
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load the config at `path`, falling back to defaults if it does not exist.
    ///
    /// A missing file is never created; nothing is written to disk here.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found at {:?}, using defaults.", path);
            return Ok(Config::default());
        }

        let file = File::open(path)
            .context(format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.markers.start.trim().is_empty() || self.markers.end.trim().is_empty() {
            return Err(anyhow!("Start and end markers must not be empty"));
        }

        if self.markers.start == self.markers.end {
            return Err(anyhow!("Start and end markers must differ"));
        }

        if self.font_file_name.is_empty() || self.fragment_file_name.is_empty() {
            return Err(anyhow!("Font and fragment file names must not be empty"));
        }

        if self.reload.enabled && self.reload.command.first().is_none_or(|p| p.is_empty()) {
            return Err(anyhow!("A reload command is required when reload is enabled"));
        }

        Ok(())
    }

    /// Path of the packaged font
    pub fn font_source(&self) -> PathBuf {
        self.dist_dir.join(&self.font_file_name)
    }

    /// Path of the packaged default fragment
    pub fn fragment_source(&self) -> PathBuf {
        self.dist_dir.join(&self.fragment_file_name)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            dist_dir: default_dist_dir(),
            font_file_name: default_font_file_name(),
            fragment_file_name: default_fragment_file_name(),
            table_path: None,
            markers: MarkerConfig::default(),
            reload: ReloadConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Operating system family the installer targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    /// Anything else, carrying the raw OS name
    Other(String),
}

impl Platform {
    /// Map an `std::env::consts::OS` style name
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "macos" | "darwin" => Self::MacOs,
            "linux" => Self::Linux,
            other => Self::Other(other.to_string()),
        }
    }

    // @returns: Platform of the running process
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Per-user font directory relative to `home`
    pub fn font_dir(&self, home: &Path) -> InstallResult<PathBuf> {
        match self {
            Self::MacOs => Ok(home.join("Library").join("Fonts")),
            Self::Linux => Ok(home.join(".local").join("share").join("fonts")),
            Self::Other(name) => Err(InstallError::UnsupportedPlatform(name.clone())),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Process-wide facts resolved once at startup and handed to the installer
#[derive(Debug, Clone)]
pub struct InstallEnvironment {
    pub home: PathBuf,
    pub platform: Platform,
}

impl InstallEnvironment {
    pub fn new(home: PathBuf, platform: Platform) -> Self {
        Self { home, platform }
    }

    /// Resolve from the running process
    pub fn detect() -> InstallResult<Self> {
        let home = dirs::home_dir().ok_or(InstallError::HomeDirUnavailable)?;
        Ok(Self::new(home, Platform::current()))
    }

    /// Destination directory for the font
    pub fn font_dir(&self) -> InstallResult<PathBuf> {
        self.platform.font_dir(&self.home)
    }

    /// Fixed per-user location of the standalone icon map
    pub fn icon_map_config_path(&self, fragment_file_name: &str) -> PathBuf {
        self.home.join(".config").join("sketchybar").join(fragment_file_name)
    }
}
