//! Tab-separated audit logs for feeder reads and writes.
//!
//! Every adapter instance owns two append-only text files, one per
//! direction. A file starts with a fixed header row and accumulates
//! one line per operation; it is never rewritten or truncated. File
//! names carry the creation timestamp, the direction and the adapter
//! name, e.g. `2026-08-26_14-03-55_Read_PLC.txt`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

/// Header row of the read log.
pub const READ_LOG_HEADER: &str = "DateTime\tFrameNumber\tRPM\tMass";

/// Header row of the write log.
pub const WRITE_LOG_HEADER: &str = "DateTime\tFrameNumber\tRPM\tFeeder";

/// Injected source of frame numbers for log-line correlation.
///
/// Invoked once per logged operation; assumed side-effect-free and
/// non-blocking. When the adapter has no source, the frame-number
/// column is left empty.
pub type FrameSource = Box<dyn Fn() -> u32 + Send>;

/// Direction of a feeder data log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDirection {
    /// Values read from the controller.
    Read,
    /// Values written to the controller.
    Write,
}

impl LogDirection {
    fn as_str(self) -> &'static str {
        match self {
            LogDirection::Read => "Read",
            LogDirection::Write => "Write",
        }
    }

    fn header(self) -> &'static str {
        match self {
            LogDirection::Read => READ_LOG_HEADER,
            LogDirection::Write => WRITE_LOG_HEADER,
        }
    }
}

/// One append-only tab-separated log file.
pub struct DataLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl DataLog {
    /// Creates the log file under `dir` and writes the header row.
    ///
    /// The parent directory is created if missing. The file name is
    /// `<timestamp>_<direction>_<name>.txt`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be
    /// created.
    pub fn create(dir: &Path, name: &str, direction: LogDirection) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = dir.join(format!("{stamp}_{}_{name}.txt", direction.as_str()));
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", direction.header())?;
        writer.flush()?;
        Ok(Self { writer, path })
    }

    /// Appends one line and flushes it to disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the write fails.
    pub fn append(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for DataLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLog").field("path", &self.path).finish()
    }
}

/// Renders the current wall-clock time for a log line.
pub(crate) fn line_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Renders the frame-number column: the source's value, or empty when
/// no source was supplied.
pub(crate) fn frame_field(source: Option<&FrameSource>) -> String {
    match source {
        Some(get) => get().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_writes_header() {
        let dir = tempdir().unwrap();
        let log = DataLog::create(dir.path(), "PLC", LogDirection::Read).unwrap();
        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, format!("{READ_LOG_HEADER}\n"));
    }

    #[test]
    fn test_file_name_scheme() {
        let dir = tempdir().unwrap();
        let log = DataLog::create(dir.path(), "PLC", LogDirection::Write).unwrap();
        let file_name = log.path().file_name().unwrap().to_str().unwrap();
        assert!(file_name.ends_with("_Write_PLC.txt"), "{file_name}");
    }

    #[test]
    fn test_append_accumulates_lines() {
        let dir = tempdir().unwrap();
        let mut log = DataLog::create(dir.path(), "PLC", LogDirection::Write).unwrap();
        log.append("a\t1\t750").unwrap();
        log.append("b\t2\t800").unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec![WRITE_LOG_HEADER, "a\t1\t750", "b\t2\t800"]);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out").join("plc");
        let log = DataLog::create(&nested, "PLC", LogDirection::Read).unwrap();
        assert!(log.path().exists());
    }

    #[test]
    fn test_frame_field() {
        assert_eq!(frame_field(None), "");
        let source: FrameSource = Box::new(|| 42);
        assert_eq!(frame_field(Some(&source)), "42");
    }
}
