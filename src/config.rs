//! Command-line configuration. The TUI owns stdout, so diagnostics go to a log
//! file under the user's home directory unless told otherwise.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".course-registry";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "course-registry.log";

/// Course, teacher and student registry in the terminal
#[derive(Parser, Debug)]
#[command(name = "course-registry")]
#[command(version)]
pub struct Args {
    /// Log level filter (trace, debug, info, warn, error). RUST_LOG wins if set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write the log here instead of ~/.course-registry/course-registry.log
    #[arg(long, conflicts_with = "no_log")]
    pub log_file: Option<PathBuf>,

    /// Disable logging entirely
    #[arg(long)]
    pub no_log: bool,
}

/// Resolved logging settings. `file: None` means logging is off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Args {
    pub fn log_config(&self) -> Result<LogConfig> {
        let file = if self.no_log {
            None
        } else if let Some(path) = &self.log_file {
            Some(path.clone())
        } else {
            Some(default_log_path()?)
        };

        Ok(LogConfig {
            level: self.log_level.clone(),
            file,
        })
    }
}

/// Resolve the default log path inside the user's home.
fn default_log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}
