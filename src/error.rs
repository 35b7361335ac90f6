//! Error types for the feeder adapter.

use std::io;
use thiserror::Error;

/// Result type alias for feeder operations.
pub type Result<T> = std::result::Result<T, FeederError>;

/// Errors that can occur while driving the feeder adapter.
///
/// Connect and probe failures are normally absorbed by the adapter
/// itself (they leave it in a degraded, inert state); the variants
/// exist so that the failure paths still carry structured context on
/// their way to the diagnostic log.
#[derive(Debug, Error)]
pub enum FeederError {
    /// Establishing the field-bus connection failed.
    #[error("connection failed: {detail}")]
    Connect {
        /// Error text from the bus client.
        detail: String,
    },

    /// The initial accessibility check on a data block failed.
    #[error("can't access {block}: {detail}")]
    Probe {
        /// Name of the data block that was probed.
        block: &'static str,
        /// Error text from the bus client.
        detail: String,
    },

    /// A post-probe remote read failed.
    #[error("block read failed: {detail}")]
    Read {
        /// Error text from the bus client.
        detail: String,
    },

    /// A post-probe remote write failed.
    #[error("block write failed: {detail}")]
    Write {
        /// Error text from the bus client.
        detail: String,
    },

    /// A field offset does not fit inside the block.
    #[error("field at offset {offset} exceeds block length {len}")]
    OutOfBounds {
        /// Byte offset of the field.
        offset: usize,
        /// Length of the block in bytes.
        len: usize,
    },

    /// I/O error on one of the audit log files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FeederError {
    /// Creates a new `Connect` error.
    pub fn connect(detail: impl Into<String>) -> Self {
        Self::Connect {
            detail: detail.into(),
        }
    }

    /// Creates a new `Probe` error for the named data block.
    pub fn probe(block: &'static str, detail: impl Into<String>) -> Self {
        Self::Probe {
            block,
            detail: detail.into(),
        }
    }

    /// Creates a new `Read` error.
    pub fn read(detail: impl Into<String>) -> Self {
        Self::Read {
            detail: detail.into(),
        }
    }

    /// Creates a new `Write` error.
    pub fn write(detail: impl Into<String>) -> Self {
        Self::Write {
            detail: detail.into(),
        }
    }

    /// Creates a new `OutOfBounds` error.
    pub fn out_of_bounds(offset: usize, len: usize) -> Self {
        Self::OutOfBounds { offset, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_display() {
        let err = FeederError::connect("host unreachable");
        assert_eq!(err.to_string(), "connection failed: host unreachable");
    }

    #[test]
    fn test_probe_display() {
        let err = FeederError::probe("DB_Read", "address out of range");
        assert_eq!(
            err.to_string(),
            "can't access DB_Read: address out of range"
        );
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = FeederError::out_of_bounds(6, 8);
        assert_eq!(err.to_string(), "field at offset 6 exceeds block length 8");
    }

    #[test]
    fn test_write_display() {
        let err = FeederError::write("CPU busy");
        assert_eq!(err.to_string(), "block write failed: CPU busy");
    }
}
