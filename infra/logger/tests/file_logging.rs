use strata_logger::{LevelFilter, LogRotation, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_logging_creates_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("integration-file-logging")
        .console(false)
        .level(LevelFilter::DEBUG)
        .path(&log_dir)
        .rotation(LogRotation::Never)
        .init()?;

    tracing::debug!(op = "delete_directory", removed = 3, "Directory deleted");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = log_dir.join("integration-file-logging.log");
    let content = fs::read_to_string(&log_file)?;
    assert!(content.contains("Directory deleted"), "event should reach the file");
    assert!(content.contains("removed=3"));

    Ok(())
}
