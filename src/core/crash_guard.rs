//! # Crash Guard
//!
//! Runs the launcher (or any program) as a child process and writes a crash
//! log when it exits abnormally.
//!
//! ```text
//! guard ──spawn──▶ child (stdout inherited, stderr captured)
//!   │                 │
//!   │◀────wait────────┘
//!   ├── exit 0        → nothing written
//!   └── exit ≠ 0 / signal → crashlog_<timestamp>.log
//! ```
//!
//! Stdout stays attached to the terminal so the TUI keeps drawing; panics
//! and other diagnostics arrive on stderr, which is what the log keeps.

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use sysinfo::System;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    Code(i32),
    Signal(i32),
    /// Terminated without a code or signal we can read.
    Unknown,
}

impl ExitOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            return ExitOutcome::Success;
        }
        if let Some(code) = status.code() {
            return ExitOutcome::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitOutcome::Signal(signal);
            }
        }
        ExitOutcome::Unknown
    }

    pub fn is_crash(self) -> bool {
        self != ExitOutcome::Success
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Success => write!(f, "exited normally"),
            ExitOutcome::Code(code) => write!(f, "exit code {code}"),
            ExitOutcome::Signal(signal) => write!(f, "terminated by signal {signal}"),
            ExitOutcome::Unknown => write!(f, "terminated abnormally"),
        }
    }
}

#[derive(Debug)]
pub enum GuardError {
    Spawn(io::Error),
    Capture(io::Error),
    Wait(io::Error),
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::Spawn(e) => write!(f, "failed to start program: {e}"),
            GuardError::Capture(e) => write!(f, "failed to read program output: {e}"),
            GuardError::Wait(e) => write!(f, "failed to wait for program: {e}"),
        }
    }
}

impl std::error::Error for GuardError {}

/// Host details written into crash logs. Fields are best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub logical_cores: String,
    pub memory: String,
    pub gpus: Vec<String>,
    pub system_type: String,
}

impl SystemInfo {
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        let os = System::long_os_version()
            .or_else(System::name)
            .unwrap_or_else(|| std::env::consts::OS.to_string());
        let os = match System::kernel_version() {
            Some(kernel) => format!("{os} (kernel {kernel})"),
            None => os,
        };
        let cpu = sys
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let logical_cores = match sys.cpus().len() {
            0 => UNKNOWN.to_string(),
            n => n.to_string(),
        };
        let arch = std::env::consts::ARCH;

        Self {
            os,
            arch: arch.to_string(),
            cpu,
            logical_cores,
            memory: format_memory(sys.total_memory()),
            gpus: gpu_names(),
            system_type: system_type(arch, cfg!(target_pointer_width = "64")),
        }
    }
}

const UNKNOWN: &str = "Unknown";
const UNKNOWN_GPU: &str = "Unknown GPU";

fn format_memory(bytes: u64) -> String {
    if bytes == 0 {
        return UNKNOWN.to_string();
    }
    format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}

fn system_type(arch: &str, is_64_bit: bool) -> String {
    let bits = if is_64_bit { 64 } else { 32 };
    let processor = match arch {
        "x86_64" => "x64",
        "x86" => "x86",
        "aarch64" => "ARM64",
        "arm" => "ARM",
        other => other,
    };
    format!("{bits}-bit operating system, {processor}-based processor")
}

/// Adapter names from the platform's own listing tool. Never empty.
fn gpu_names() -> Vec<String> {
    const WMIC_ARGS: &[&str] = &["path", "win32_VideoController", "get", "name"];
    const PROFILER_ARGS: &[&str] = &["SPDisplaysDataType"];
    let (program, args, style) = if cfg!(windows) {
        ("wmic", WMIC_ARGS, GpuListing::Wmic)
    } else if cfg!(target_os = "macos") {
        ("system_profiler", PROFILER_ARGS, GpuListing::SystemProfiler)
    } else {
        ("lspci", &[][..], GpuListing::Lspci)
    };

    let gpus = match std::process::Command::new(program).args(args).output() {
        Ok(output) => parse_gpu_listing(style, &String::from_utf8_lossy(&output.stdout)),
        Err(e) => {
            debug!("Could not list GPUs with {program}: {e}");
            Vec::new()
        }
    };
    if gpus.is_empty() {
        vec![UNKNOWN_GPU.to_string()]
    } else {
        gpus
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GpuListing {
    Lspci,
    SystemProfiler,
    Wmic,
}

fn parse_gpu_listing(style: GpuListing, listing: &str) -> Vec<String> {
    let lines = listing.lines().map(str::trim).filter(|l| !l.is_empty());
    match style {
        GpuListing::Lspci => lines
            .filter(|l| {
                let lower = l.to_ascii_lowercase();
                lower.contains("vga") || lower.contains("3d controller")
            })
            .filter_map(|l| l.split_once(": ").map(|(_, name)| name.to_string()))
            .collect(),
        GpuListing::SystemProfiler => lines
            .filter_map(|l| l.strip_prefix("Chipset Model:"))
            .map(|name| name.trim().to_string())
            .collect(),
        GpuListing::Wmic => lines.skip(1).map(str::to_string).collect(),
    }
}

#[derive(Debug)]
pub struct GuardReport {
    pub outcome: ExitOutcome,
    pub output: Vec<String>,
    pub crash_log: Option<PathBuf>,
}

/// Run `program` to completion, returning its outcome and captured stderr.
pub async fn supervise(
    program: &Path,
    args: &[String],
) -> Result<(ExitOutcome, Vec<String>), GuardError> {
    info!("Supervising {}", program.display());
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(GuardError::Spawn)?;

    let mut captured = Vec::new();
    if let Some(mut stderr) = child.stderr.take() {
        stderr
            .read_to_end(&mut captured)
            .await
            .map_err(GuardError::Capture)?;
    }
    let status = child.wait().await.map_err(GuardError::Wait)?;

    let output = String::from_utf8_lossy(&captured)
        .lines()
        .map(str::to_string)
        .collect();
    let outcome = ExitOutcome::from_status(status);
    info!("{} {outcome}", program.display());
    Ok((outcome, output))
}

/// Render the crash log body.
pub fn format_crash_log(
    program: &Path,
    outcome: ExitOutcome,
    output: &[String],
    system: &SystemInfo,
    now: DateTime<Local>,
) -> String {
    let mut log = format!(
        "{} crashed at {}. Please send this log to the maintainers.\n",
        program.display(),
        now.format("%Y-%m-%d %H:%M:%S")
    );
    log.push_str("--------------------\n");
    log.push_str(&format!("OS: {}\n", system.os));
    log.push_str(&format!("Architecture: {}\n", system.arch));
    log.push_str(&format!("CPU: {}\n", system.cpu));
    log.push_str(&format!("Logical cores: {}\n", system.logical_cores));
    log.push_str(&format!("Memory: {}\n", system.memory));
    log.push_str("GPUs:\n");
    for (i, gpu) in system.gpus.iter().enumerate() {
        log.push_str(&format!("GPU{i}: {gpu}\n"));
    }
    log.push_str(&format!("System type: {}\n", system.system_type));
    log.push_str("--------------------\n");
    log.push_str(&format!("Exit: {outcome}\n"));
    log.push_str("Output captured before the crash:\n");
    for line in output {
        log.push_str(line);
        log.push('\n');
    }
    log
}

/// Write `crashlog_<YYYYmmddHHMMSSmmm>.log` into `dir`.
pub fn write_crash_log(
    dir: &Path,
    program: &Path,
    outcome: ExitOutcome,
    output: &[String],
    system: &SystemInfo,
    now: DateTime<Local>,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("crashlog_{}.log", now.format("%Y%m%d%H%M%S%3f")));
    fs::write(&path, format_crash_log(program, outcome, output, system, now))?;
    Ok(path)
}

/// Supervise `program` and write a crash log into `crash_dir` if it crashes.
pub async fn run_guarded(
    program: &Path,
    args: &[String],
    crash_dir: &Path,
) -> Result<GuardReport, GuardError> {
    let (outcome, output) = supervise(program, args).await?;

    let crash_log = if outcome.is_crash() {
        match write_crash_log(
            crash_dir,
            program,
            outcome,
            &output,
            &SystemInfo::collect(),
            Local::now(),
        ) {
            Ok(path) => {
                info!("Crash log written to {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Failed to write crash log: {e}");
                None
            }
        }
    } else {
        None
    };

    Ok(GuardReport {
        outcome,
        output,
        crash_log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_system() -> SystemInfo {
        SystemInfo {
            os: "linux 6.1".into(),
            arch: "x86_64".into(),
            cpu: "Test CPU".into(),
            logical_cores: "4".into(),
            memory: "8.0 GB".into(),
            gpus: vec!["Test GPU".into()],
            system_type: "64-bit operating system, x64-based processor".into(),
        }
    }

    #[test]
    fn test_parse_lspci_listing() {
        let listing = "\
00:02.0 VGA compatible controller: Intel Corporation UHD Graphics 620
00:14.0 USB controller: Intel Corporation Sunrise Point-LP USB 3.0
01:00.0 3D controller: NVIDIA Corporation GP108M [GeForce MX150]
";
        assert_eq!(
            parse_gpu_listing(GpuListing::Lspci, listing),
            vec![
                "Intel Corporation UHD Graphics 620".to_string(),
                "NVIDIA Corporation GP108M [GeForce MX150]".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_system_profiler_and_wmic_listings() {
        let profiler = "\
Graphics/Displays:

    Apple M1:

      Chipset Model: Apple M1
      Type: GPU
";
        assert_eq!(
            parse_gpu_listing(GpuListing::SystemProfiler, profiler),
            vec!["Apple M1".to_string()]
        );

        let wmic = "Name  \r\nNVIDIA GeForce RTX 3060  \r\n\r\n";
        assert_eq!(
            parse_gpu_listing(GpuListing::Wmic, wmic),
            vec!["NVIDIA GeForce RTX 3060".to_string()]
        );
    }

    #[test]
    fn test_system_type_and_memory_format() {
        assert_eq!(
            system_type("x86_64", true),
            "64-bit operating system, x64-based processor"
        );
        assert_eq!(
            system_type("arm", false),
            "32-bit operating system, ARM-based processor"
        );
        assert_eq!(format_memory(8 * 1024 * 1024 * 1024), "8.0 GB");
        assert_eq!(format_memory(0), "Unknown");
    }

    #[test]
    fn test_collected_system_info_is_complete() {
        let info = SystemInfo::collect();
        assert!(!info.os.is_empty());
        assert!(!info.gpus.is_empty());
        assert!(info.system_type.contains("-bit operating system"));

        let now = Local.with_ymd_and_hms(2025, 6, 1, 12, 30, 5).unwrap();
        let body = format_crash_log(Path::new("prog"), ExitOutcome::Code(1), &[], &info, now);
        assert!(body.contains("GPU0: "));
        assert!(body.contains("System type: "));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(ExitOutcome::Code(3).to_string(), "exit code 3");
        assert_eq!(ExitOutcome::Signal(11).to_string(), "terminated by signal 11");
        assert!(!ExitOutcome::Success.is_crash());
        assert!(ExitOutcome::Unknown.is_crash());
    }

    #[test]
    fn test_crash_log_contents() {
        let now = Local.with_ymd_and_hms(2025, 6, 1, 12, 30, 5).unwrap();
        let body = format_crash_log(
            Path::new("launcher/swarmclone-launcher"),
            ExitOutcome::Code(101),
            &["thread 'main' panicked".to_string()],
            &sample_system(),
            now,
        );
        assert!(body.starts_with("launcher/swarmclone-launcher crashed at 2025-06-01 12:30:05."));
        assert!(body.contains("CPU: Test CPU\n"));
        assert!(body.contains("GPU0: Test GPU\n"));
        assert!(body.contains("System type: 64-bit operating system"));
        assert!(body.contains("Exit: exit code 101\n"));
        assert!(body.ends_with("thread 'main' panicked\n"));
    }

    #[test]
    fn test_write_crash_log_names_file_by_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local.with_ymd_and_hms(2025, 6, 1, 12, 30, 5).unwrap();
        let path = write_crash_log(
            dir.path(),
            Path::new("prog"),
            ExitOutcome::Signal(6),
            &[],
            &sample_system(),
            now,
        )
        .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "crashlog_20250601123005000.log"
        );
        assert!(fs::read_to_string(&path).unwrap().contains("signal 6"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_crashing_child_produces_log() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()];
        let report = run_guarded(Path::new("sh"), &args, dir.path())
            .await
            .unwrap();

        assert_eq!(report.outcome, ExitOutcome::Code(3));
        assert_eq!(report.output, vec!["boom".to_string()]);
        let log = fs::read_to_string(report.crash_log.unwrap()).unwrap();
        assert!(log.contains("boom"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clean_exit_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec!["-c".to_string(), "exit 0".to_string()];
        let report = run_guarded(Path::new("sh"), &args, dir.path())
            .await
            .unwrap();

        assert_eq!(report.outcome, ExitOutcome::Success);
        assert!(report.crash_log.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_guarded(Path::new("/definitely/not/here"), &[], dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Spawn(_)));
    }
}
