use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append a failure entry to the failure log in the default location
pub fn log_failure(classification: &str, message: &str) -> Result<()> {
    log_failure_to(&default_log_dir(), classification, message)
}

/// Append a failure entry to the failure log in the given directory
pub fn log_failure_to(log_dir: &Path, classification: &str, message: &str) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join("failures.log");

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    writeln!(
        file,
        "[{}] [{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        classification,
        message
    )?;
    Ok(())
}

/// Failure log directory (respecting XDG)
fn default_log_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("redraft")
}
