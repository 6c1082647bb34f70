//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → built-in resources → config file → env vars → CLI flags.
//!
//! Config lives at `~/.swarmclone/launcher.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::resource::{
    BASE_THEME, ResourceResolver, ResourceScope, ResourceValue, ThemeResources,
};

/// Resources compiled into the binary.
const BUILTIN_RESOURCES: &str = include_str!("resources.toml");

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LauncherConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub crash: CrashConfig,
    /// Application-scope resource overrides.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceValue>,
    /// Theme dictionaries, merged key by key over the built-in ones.
    #[serde(default)]
    pub themes: BTreeMap<String, BTreeMap<String, ResourceValue>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<String>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CrashConfig {
    pub log_dir: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "launcher.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub theme: String,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub crash_dir: PathBuf,
    pub resources: BTreeMap<String, ResourceValue>,
    pub themes: BTreeMap<String, BTreeMap<String, ResourceValue>>,
}

impl ResolvedConfig {
    pub fn resolver(&self) -> ResourceResolver {
        ResourceResolver::new(
            ResourceScope::new("application", self.resources.clone()),
            ThemeResources::new(self.theme.clone(), self.themes.clone()),
        )
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.swarmclone/launcher.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".swarmclone").join("launcher.toml"))
}

/// Load config from `~/.swarmclone/launcher.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LauncherConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LauncherConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(LauncherConfig::default())
        }
    }
}

/// Load config from `path`, generating the commented default if it is missing.
pub fn load_config_from(path: &Path) -> Result<LauncherConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LauncherConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LauncherConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Parse the resources shipped with the launcher.
pub fn builtin_resources() -> Result<LauncherConfig, ConfigError> {
    toml::from_str(BUILTIN_RESOURCES).map_err(ConfigError::Parse)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# SwarmClone Launcher Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "default"                  # Or SWARMCLONE_THEME / --theme
# log_file = "launcher.log"
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"

# [crash]
# log_dir = "."                      # Where crashlog_*.log files are written

# [resources]
# WebsiteLink = "https://swarmclone.github.io"
# GitHubLink = "https://github.com/SwarmClone/SwarmClone"
# WelcomeText = "Welcome back."

# [themes.mine]
# HomeIcon = { icon = "@" }
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing:
/// defaults → built-in resources → config file → env vars → CLI.
///
/// `cli_theme` is the `--theme` flag; `verbose` forces debug logging.
pub fn resolve(
    config: &LauncherConfig,
    cli_theme: Option<&str>,
    verbose: bool,
) -> Result<ResolvedConfig, ConfigError> {
    let builtin = builtin_resources()?;

    let mut resources = builtin.resources;
    resources.extend(config.resources.clone());

    let mut themes = builtin.themes;
    for (name, entries) in &config.themes {
        themes
            .entry(name.clone())
            .or_default()
            .extend(entries.clone());
    }

    // Theme: CLI → env → config → default
    let requested = cli_theme
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SWARMCLONE_THEME").ok())
        .or_else(|| config.general.theme.clone())
        .unwrap_or_else(|| BASE_THEME.to_string());
    let theme = if themes.contains_key(&requested) {
        requested
    } else {
        warn!("Theme '{requested}' is not defined, using '{BASE_THEME}'");
        BASE_THEME.to_string()
    };

    // Log level: verbose flag → env → config → default
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        std::env::var("SWARMCLONE_LOG_LEVEL")
            .ok()
            .or_else(|| config.general.log_level.clone())
            .and_then(|level| parse_level(&level))
            .unwrap_or(DEFAULT_LOG_LEVEL)
    };

    let log_file = PathBuf::from(
        config
            .general
            .log_file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
    );

    // Crash log directory: env → config → current directory
    let crash_dir = std::env::var("SWARMCLONE_CRASH_DIR")
        .ok()
        .or_else(|| config.crash.log_dir.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(ResolvedConfig {
        theme,
        log_file,
        log_level,
        crash_dir,
        resources,
        themes,
    })
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match LevelFilter::from_str(level) {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Unknown log level '{level}', using default");
            None
        }
    }
}
