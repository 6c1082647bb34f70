//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::{LauncherConfig, resolve};
use crate::core::resource::ResourceResolver;
use crate::core::state::App;

/// Resolver over the built-in resources with the default theme.
pub fn test_resolver() -> ResourceResolver {
    resolve(&LauncherConfig::default(), Some("default"), false)
        .expect("built-in resources parse")
        .resolver()
}

/// Creates a test App over the built-in resources.
pub fn test_app() -> App {
    App::new(test_resolver()).expect("built-in icons resolve")
}

/// Per-thread log capture.
///
/// A single global logger records into a thread-local buffer, so each test
/// (one thread per test) only sees its own diagnostics.
pub mod captured_logs {
    use log::{LevelFilter, Log, Metadata, Record};
    use std::cell::RefCell;
    use std::sync::Once;

    thread_local! {
        static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            let line = format!("{} {}", record.level(), record.args());
            LINES.with(|lines| lines.borrow_mut().push(line));
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INSTALL: Once = Once::new();

    fn install() {
        INSTALL.call_once(|| {
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(LevelFilter::Trace);
            }
        });
    }

    /// Install the logger if needed and drop anything captured so far.
    pub fn clear() {
        install();
        LINES.with(|lines| lines.borrow_mut().clear());
    }

    pub fn take() -> Vec<String> {
        LINES.with(|lines| std::mem::take(&mut *lines.borrow_mut()))
    }
}
