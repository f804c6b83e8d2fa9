use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;

/// Logger that writes timestamped lines to standard error
#[derive(Clone)]
pub struct ConsoleLogger {
    max_level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let label = match record.level() {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };

        let _ = writeln!(
            std::io::stderr().lock(),
            "{} {}: {}",
            Local::now().format("%H:%M:%S"),
            label,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
