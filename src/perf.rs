//! Lightweight timing instrumentation and an opt-in event log.
//!
//! `--perf` prints scope timings to stderr; `--debug-log <path>` appends
//! timestamped event lines so timer and input behavior can be inspected
//! after a session without a debugger attached.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static EVENT_LOG: LazyLock<Mutex<EventLog>> = LazyLock::new(|| Mutex::new(EventLog::new()));

/// Prints its elapsed time on drop when `--perf` is active.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        eprintln!("[perf] {}: {:.2} ms", self.name, elapsed_ms);
    }
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

#[derive(Debug)]
struct EventLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl EventLog {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }
}

/// Route event lines to `path`, or disable the log with `None`.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or written.
pub fn set_event_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = EVENT_LOG.lock().expect("event log lock poisoned");
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writeln!(writer, "vitrine event log start")?;
            writer.flush()?;
            log.start = Instant::now();
            log.writer = Some(writer);
        }
        None => log.writer = None,
    }
    Ok(())
}

/// Append one event line. A no-op unless an event log path is set.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut log = EVENT_LOG.lock().expect("event log lock poisoned");
    let elapsed_ms = log.start.elapsed().as_secs_f64() * 1000.0;
    if let Some(writer) = log.writer.as_mut() {
        let _ = writeln!(writer, "[{elapsed_ms:>10.3} ms] {name}: {}", detail.as_ref());
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_set_enabled_toggles_runtime_flag() {
        set_enabled(true);
        assert!(is_enabled());

        set_enabled(false);
        assert!(!is_enabled());
    }

    #[test]
    fn test_event_log_writes_named_events() {
        let temp_file = NamedTempFile::new().unwrap();
        set_event_log_path(Some(temp_file.path())).unwrap();
        log_event("autoplay.fire", "gallery=0 index=3");
        set_event_log_path(None).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("vitrine event log start"));
        assert!(content.contains("autoplay.fire: gallery=0 index=3"));
    }
}
