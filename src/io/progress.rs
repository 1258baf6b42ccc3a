//! Progress spinner for level generation and a `log` sink that prints through it

use std::sync::LazyLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, Log, Metadata, Record};

use crate::io::configuration::SPINNER_TICK_MS;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Spinner shown while generation runs
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create an idle spinner
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(SPINNER_STYLE.clone());
        Self { bar }
    }

    /// Start spinning with a message
    pub fn start(&self, message: &str) {
        self.bar.set_message(message.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    }

    /// Replace the spinner message
    pub fn update(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Stop spinning, leaving a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Stop spinning and remove the spinner line
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }

    /// Handle to the underlying bar, used by [`ProgressLogger`]
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }
}

/// Log sink that prints above an active spinner, or to stderr without one
pub struct ProgressLogger {
    filter: LevelFilter,
    bar: Option<ProgressBar>,
}

impl ProgressLogger {
    /// Logger accepting records up to `filter`
    pub const fn new(filter: LevelFilter, bar: Option<ProgressBar>) -> Self {
        Self { filter, bar }
    }

    /// Register as the global logger
    ///
    /// Returns `false` if another logger was installed first.
    pub fn install(self) -> bool {
        let filter = self.filter;
        let installed = log::set_boxed_logger(Box::new(self)).is_ok();
        if installed {
            log::set_max_level(filter);
        }
        installed
    }

    /// Text written for a record
    pub fn format(record: &Record<'_>) -> String {
        format!("[{:<5}] {}", record.level(), record.args())
    }
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.filter
    }

    // Allow print for diagnostics when no spinner is drawing
    #[allow(clippy::print_stderr)]
    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = Self::format(record);
        match &self.bar {
            Some(bar) if !bar.is_hidden() && !bar.is_finished() => bar.println(line),
            _ => eprintln!("{line}"),
        }
    }

    fn flush(&self) {}
}

/// Log level selected by the `-v` count, or errors only when quiet
pub const fn verbosity_filter(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
