#[cfg(debug_assertions)]
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use simplelog::{CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, WriteLogger};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use storecheck_platform::AppPaths;

/// Cut the oldest lines so at most half of `max_log_size` bytes remain.
///
/// Returns `Ok(false)` when the file is already within the limit.
fn truncate_log_file(log_path: &Path, max_log_size: u64) -> io::Result<bool> {
    if std::fs::metadata(log_path)?.len() <= max_log_size {
        return Ok(false);
    }

    let contents = std::fs::read(log_path)?;
    let budget = usize::try_from(max_log_size / 2).unwrap_or(usize::MAX);
    let cut = contents.len().saturating_sub(budget);
    let start = contents[cut..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(contents.len(), |pos| cut + pos + 1);
    std::fs::write(log_path, &contents[start..])?;
    Ok(true)
}

fn max_level(debug_enabled: bool) -> log::LevelFilter {
    if debug_enabled {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off
    }
}

pub fn init_logging(paths: &AppPaths, debug_enabled: bool, max_log_size: u64) {
    let _ = paths.ensure_dirs();
    let log_path = paths.log_file();

    match truncate_log_file(&log_path, max_log_size) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => eprintln!("storecheck: failed to truncate {}: {e}", log_path.display()),
    }

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("storecheck")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    #[cfg(debug_assertions)]
    loggers.push(TermLogger::new(
        LevelFilter::Debug,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }

    log::set_max_level(max_level(debug_enabled));

    if debug_enabled {
        log::info!(
            "Debug logging initialized, log file: {}",
            log_path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{max_level, truncate_log_file};

    fn numbered_lines(count: usize) -> String {
        (1..=count).map(|n| format!("entry {n:03}\n")).collect()
    }

    #[test]
    fn oversized_log_keeps_whole_recent_lines_within_budget() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let log_path = temp_dir.path().join("debug.log");
        std::fs::write(&log_path, numbered_lines(20)).expect("log file should be written");

        let truncated = truncate_log_file(&log_path, 100).expect("truncation should succeed");

        let kept = std::fs::read_to_string(&log_path).expect("log file should be readable");
        assert!(truncated);
        assert!(kept.len() <= 50);
        assert!(kept.starts_with("entry "));
        assert!(kept.ends_with("entry 020\n"));
        assert!(!kept.contains("entry 001"));
    }

    #[test]
    fn log_within_limit_is_untouched() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let log_path = temp_dir.path().join("debug.log");
        std::fs::write(&log_path, numbered_lines(3)).expect("log file should be written");

        let truncated = truncate_log_file(&log_path, 1024).expect("truncation should succeed");

        assert!(!truncated);
        assert_eq!(
            std::fs::read_to_string(&log_path).expect("log file should be readable"),
            numbered_lines(3)
        );
    }

    #[test]
    fn missing_log_reports_not_found() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");

        let error = truncate_log_file(&temp_dir.path().join("debug.log"), 10)
            .expect_err("missing file has no metadata");

        assert_eq!(error.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn debug_setting_maps_to_level() {
        assert_eq!(max_level(true), log::LevelFilter::Debug);
        assert_eq!(max_level(false), log::LevelFilter::Off);
    }
}
