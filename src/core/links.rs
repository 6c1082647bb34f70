//! # External Links
//!
//! Opens URLs in the host's default handler. The launch mechanism is chosen
//! from the platform at call time. The caller never waits on the handler; a
//! detached thread reaps it once it exits.
//!
//! `open_url` swallows every failure after logging it, so callers get no
//! signal. `try_open_url` returns the outcome for callers that want one.

use clap::ValueEnum;
use log::{debug, info, warn};
use std::fmt;
use std::io;
use std::process::Command;

use crate::core::resource::ResourceResolver;

/// Used when a link resource is missing.
pub const FALLBACK_URL: &str = "https://github.com/SwarmClone/SwarmClone";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkKind {
    Website,
    #[value(name = "github")]
    GitHub,
    Community,
}

impl LinkKind {
    pub fn resource_key(self) -> &'static str {
        match self {
            LinkKind::Website => "WebsiteLink",
            LinkKind::GitHub => "GitHubLink",
            LinkKind::Community => "QGroupLink",
        }
    }

    /// Resolve the URL for this link, falling back to [`FALLBACK_URL`].
    pub fn url(self, resolver: &ResourceResolver) -> String {
        let url = resolver
            .resolve_text(self.resource_key())
            .unwrap_or_else(|| FALLBACK_URL.to_string());
        info!("Resolved {} to {url}", self.resource_key());
        url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            _ => Platform::Other,
        }
    }
}

#[derive(Debug)]
pub enum LaunchError {
    UnsupportedPlatform(String),
    Spawn(io::Error),
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::UnsupportedPlatform(os) => {
                write!(f, "opening URLs is not supported on {os}")
            }
            LaunchError::Spawn(e) => write!(f, "failed to start URL handler: {e}"),
        }
    }
}

impl std::error::Error for LaunchError {}

/// Program and arguments that open `url` on `platform`.
pub fn launch_command(
    platform: Platform,
    url: &str,
) -> Result<(String, Vec<String>), LaunchError> {
    match platform {
        // rundll32 hands the URL to the shell unparsed; `cmd /c start` would
        // split it at `&`.
        Platform::Windows => Ok((
            "rundll32".to_string(),
            vec!["url.dll,FileProtocolHandler".into(), url.to_string()],
        )),
        Platform::Linux => Ok(("xdg-open".to_string(), vec![url.to_string()])),
        Platform::MacOs => Ok(("open".to_string(), vec![url.to_string()])),
        Platform::Other => Err(LaunchError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        )),
    }
}

pub fn try_open_url(url: &str) -> Result<(), LaunchError> {
    let (program, args) = launch_command(Platform::current(), url)?;
    spawn_handler(url, &program, &args)
}

/// Open `url`, logging any failure instead of returning it.
pub fn open_url(url: &str) {
    match launch_command(Platform::current(), url) {
        Ok((program, args)) => open_with(url, &program, &args),
        Err(e) => warn!("Failed to open URL {url}: {e}"),
    }
}

fn open_with(url: &str, program: &str, args: &[String]) {
    if let Err(e) = spawn_handler(url, program, args) {
        warn!("Failed to open URL {url}: {e}");
    }
}

fn spawn_handler(url: &str, program: &str, args: &[String]) -> Result<(), LaunchError> {
    let mut child = Command::new(program)
        .args(args)
        .spawn()
        .map_err(LaunchError::Spawn)?;
    info!("Opened {url} with {program}");

    let reaper = std::thread::Builder::new()
        .name("url-handler-reaper".to_string())
        .spawn(move || {
            if let Err(e) = child.wait() {
                debug!("Could not wait on URL handler: {e}");
            }
        });
    if let Err(e) = reaper {
        debug!("Could not start reaper thread: {e}");
    }
    Ok(())
}
