use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use colored::Colorize;
use env_logger::Builder;
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// The spinner currently drawing on stderr, if any. Log records suspend it so
/// they never land on the same line as the spinner text.
static ACTIVE_SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn active_spinner() -> Option<ProgressBar> {
    ACTIVE_SPINNER.lock().ok().and_then(|slot| slot.clone())
}

fn set_active_spinner(bar: Option<ProgressBar>) {
    if let Ok(mut slot) = ACTIVE_SPINNER.lock() {
        *slot = bar;
    }
}

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error, // default: only errors
        1 => LevelFilter::Info,  // -v: info and up
        2 => LevelFilter::Debug, // -vv: debug and up
        _ => LevelFilter::Trace, // -vvv: trace and up
    }
}

/// env_logger wrapped so records are written around the spinner.
struct SpinnerAwareLogger {
    inner: env_logger::Logger,
}

impl Log for SpinnerAwareLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.inner.matches(record) {
            return;
        }
        match active_spinner() {
            Some(spinner) => spinner.suspend(|| self.inner.log(record)),
            None => self.inner.log(record),
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

pub fn init_logger(verbosity: u8) {
    let mut builder = Builder::new();
    builder.filter_level(level_for(verbosity));

    builder.format(|buf, record| {
        let level_label = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn  => "WARN ".yellow().bold(),
            Level::Info  => "INFO ".white().bold(),
            Level::Debug => "DEBUG".bright_black(),
            Level::Trace => "TRACE".bright_black(),
        };

        writeln!(buf, "{} {}", level_label, record.args())
    });

    let inner = builder.build();
    let max_level = inner.filter();
    if log::set_boxed_logger(Box::new(SpinnerAwareLogger { inner })).is_ok() {
        log::set_max_level(max_level);
    }
}

/// Spinner on stderr while the model request is in flight. Cleared on drop.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(model: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(format!("Summarizing changelog with {model}..."));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self::with_bar(bar)
    }

    fn with_bar(bar: ProgressBar) -> Self {
        set_active_spinner(Some(bar.clone()));
        Spinner { bar }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        set_active_spinner(None);
        self.bar.finish_and_clear();
    }
}
