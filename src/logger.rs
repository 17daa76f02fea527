use std::io::Write;

use log::{Log, Metadata, Record};

/// Minimal stderr logger: the wrapper's own output must stay out of the way
/// of whatever the wrapped tool prints on stdout.
struct StderrLogger {
    filter: log::LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(
            std::io::stderr(),
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Initialize the global logger. Must be called once before any logging.
/// The level filter comes from `RUST_LOG` and defaults to `Warn`.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(log::LevelFilter::Warn);

    log::set_boxed_logger(Box::new(StderrLogger { filter })).expect("logger already initialized");
    log::set_max_level(filter);
}
