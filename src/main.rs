use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use swarmclone_launcher::core::config::{self, ResolvedConfig};
use swarmclone_launcher::core::crash_guard;
use swarmclone_launcher::core::links::{self, LinkKind};
use swarmclone_launcher::core::state::App;
use swarmclone_launcher::tui;

#[derive(Parser)]
#[command(name = "swarmclone-launcher", about = "SwarmClone terminal launcher")]
struct Args {
    /// Theme used to resolve icons
    #[arg(long)]
    theme: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program (this launcher by default) and write a crash log if it crashes
    Guard {
        /// Program to supervise
        #[arg(long)]
        program: Option<PathBuf>,
        /// Directory for crashlog_*.log files
        #[arg(long)]
        crash_dir: Option<PathBuf>,
        /// Arguments passed to the program
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Open one of the project links in the default browser
    Open {
        #[arg(value_enum)]
        link: LinkKind,
    },
}

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let user_config = config::load_config().map_err(io::Error::other)?;
    let resolved = config::resolve(&user_config, args.theme.as_deref(), args.verbose)
        .map_err(io::Error::other)?;

    init_logging(&resolved);
    log::info!("Launcher starting up with theme: {}", resolved.theme);

    match args.command {
        None => {
            let app = App::new(resolved.resolver()).map_err(io::Error::other)?;
            tui::run(app)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Guard {
            program,
            crash_dir,
            args,
        }) => {
            let program = match program {
                Some(p) => p,
                None => std::env::current_exe()?,
            };
            let crash_dir = crash_dir.unwrap_or(resolved.crash_dir);
            let report = crash_guard::run_guarded(&program, &args, &crash_dir)
                .await
                .map_err(io::Error::other)?;

            for line in &report.output {
                eprintln!("{line}");
            }
            eprintln!("{}: {}", program.display(), report.outcome);
            if let Some(path) = &report.crash_log {
                eprintln!("Crash log written to {}", path.display());
            }
            Ok(if report.outcome.is_crash() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Some(Command::Open { link }) => {
            let url = link.url(&resolved.resolver());
            match links::try_open_url(&url) {
                Ok(()) => {
                    println!("Opened {url}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Could not open {url}: {e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

/// Appends to the configured log file; logging is skipped if it can't be opened.
fn init_logging(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
    {
        Ok(log_file) => {
            let _ = WriteLogger::init(config.log_level, log_config, log_file);
        }
        Err(e) => eprintln!("Could not open log file {}: {e}", config.log_file.display()),
    }
}
