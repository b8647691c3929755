use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Where log lines go. The terminal client owns stdout, so lines never go there.
pub enum LogSink {
    Stderr,
    File(Mutex<File>),
    Disabled,
}

impl LogSink {
    pub fn file(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(LogSink::File(Mutex::new(file)))
    }
}

pub struct Logger {
    prefix: Option<String>,
    sink: LogSink,
}

impl Logger {
    fn new(prefix: Option<String>, sink: LogSink) -> Self {
        Self { prefix, sink }
    }

    fn format_line(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message)
        } else {
            format!("[{}][{}:{}] {}", timestamp, file_name, line, message)
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        match &self.sink {
            LogSink::Disabled => {}
            LogSink::Stderr => eprintln!("{}", self.format_line(file, line, message)),
            LogSink::File(handle) => {
                let formatted = self.format_line(file, line, message);
                if let Ok(mut handle) = handle.lock() {
                    let _ = writeln!(handle, "{}", formatted);
                }
            }
        }
    }
}

/// First call wins; later calls are ignored.
pub fn init_logger(prefix: Option<String>, sink: LogSink) {
    LOGGER.get_or_init(|| Logger::new(prefix, sink));
}

/// Lines logged before [`init_logger`] are dropped, which keeps library
/// code quiet in tests and benches.
pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
