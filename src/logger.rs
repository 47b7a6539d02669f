use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

pub const LOG_FILE: &str = "study_aid.log";

/// Appends log records to a file so nothing reaches the terminal while the UI owns it.
pub struct FileLogger {
    file: Mutex<Option<File>>,
}

lazy_static::lazy_static! {
    static ref LOGGER: FileLogger = FileLogger {
        file: Mutex::new(None),
    };
}

/// Install the file logger. Safe to call more than once.
pub fn init(level: LevelFilter) {
    init_at(Path::new(LOG_FILE), level);
}

pub fn init_at(path: &Path, level: LevelFilter) {
    if let Ok(mut file) = LOGGER.file.lock()
        && file.is_none()
        && let Ok(opened) = OpenOptions::new().create(true).append(true).open(path)
    {
        *file = Some(opened);
    }

    if log::set_logger(&*LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn format_record(record: &Record) -> String {
    format!(
        "[{}] {:<5} {}: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock()
            && let Some(file) = file.as_mut()
        {
            let _ = writeln!(file, "{}", format_record(record));
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock()
            && let Some(file) = file.as_mut()
        {
            let _ = file.flush();
        }
    }
}
