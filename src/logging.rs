use crate::error::AppError;
use crate::settings::get_game_data_dir;

use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug)]
struct FileLogger {
    log_file: PathBuf,
    level: LevelFilter,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format!(
                "[{}] {} {} - {}\n",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            );

            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
            {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

/// Installs the file logger under the game data directory.
///
/// The terminal belongs to the UI, so nothing is ever written to stdout.
pub fn init(debug_mode: bool) -> Result<PathBuf, AppError> {
    let log_path = get_game_data_dir().ok_or(AppError::HomeDirNotFound)?;
    create_dir_all(&log_path)?;
    let log_file = log_path.join("log.txt");

    let level = if debug_mode {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    LOGGER
        .set(FileLogger {
            log_file: log_file.clone(),
            level,
        })
        .map_err(|_| AppError::LoggerAlreadySet)?;

    let logger = LOGGER.get().ok_or(AppError::LoggerAlreadySet)?;
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(log_file)
}
