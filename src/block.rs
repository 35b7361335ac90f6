//! Local mirrors of the controller's data blocks.
//!
//! A [`MemoryBlock`] is a fixed-length byte buffer shadowing one remote
//! data block. The adapter keeps two of them: the read block (DB 23),
//! refreshed from the controller on every read, and the write block
//! (DB 30), mutated field by field and written back whole. Fields are
//! 32-bit REAL values in S7 byte order (big-endian) at fixed byte
//! offsets.
//!
//! # Example
//!
//! ```
//! use plc_feeder::MemoryBlock;
//!
//! let mut block = MemoryBlock::new();
//! block.set_f32_at(4, 12.5)?;
//! assert_eq!(block.f32_at(4)?, 12.5);
//! assert_eq!(block.f32_at(0)?, 0.0);
//! # Ok::<(), plc_feeder::FeederError>(())
//! ```

use crate::error::{FeederError, Result};

/// Data block number of the controller's read block (DB_S7RemComm_Read).
pub const READ_BLOCK_ID: u16 = 23;

/// Data block number of the controller's write block (DB_S7RemComm_Write).
pub const WRITE_BLOCK_ID: u16 = 30;

/// Length of each mirrored data block in bytes.
pub const BLOCK_LEN: usize = 8;

/// Length of the read block in bytes.
pub const READ_BLOCK_LEN: usize = BLOCK_LEN;

/// Length of the write block in bytes.
pub const WRITE_BLOCK_LEN: usize = BLOCK_LEN;

/// Width of a 32-bit REAL field in bytes.
pub const FIELD_LEN: usize = 4;

/// Fixed-length local mirror of one remote data block.
///
/// Owned exclusively by the adapter; the buffer persists across calls,
/// so staging one field leaves every other byte untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBlock {
    bytes: [u8; BLOCK_LEN],
}

impl MemoryBlock {
    /// Creates a zero-filled block mirror.
    pub fn new() -> Self {
        Self {
            bytes: [0; BLOCK_LEN],
        }
    }

    /// Decodes the 32-bit REAL field at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `FeederError::OutOfBounds` if `offset + 4` exceeds the
    /// block length.
    pub fn f32_at(&self, offset: usize) -> Result<f32> {
        let end = offset
            .checked_add(FIELD_LEN)
            .ok_or_else(|| FeederError::out_of_bounds(offset, BLOCK_LEN))?;
        let bytes = self
            .bytes
            .get(offset..end)
            .ok_or_else(|| FeederError::out_of_bounds(offset, BLOCK_LEN))?;
        // S7 REAL is plain big-endian
        Ok(f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Encodes `value` as a 32-bit REAL field at `offset`, leaving the
    /// rest of the block untouched.
    ///
    /// # Errors
    ///
    /// Returns `FeederError::OutOfBounds` if `offset + 4` exceeds the
    /// block length.
    pub fn set_f32_at(&mut self, offset: usize, value: f32) -> Result<()> {
        let end = offset
            .checked_add(FIELD_LEN)
            .ok_or_else(|| FeederError::out_of_bounds(offset, BLOCK_LEN))?;
        let dst = self
            .bytes
            .get_mut(offset..end)
            .ok_or_else(|| FeederError::out_of_bounds(offset, BLOCK_LEN))?;
        dst.copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    /// Returns the raw block bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the raw block bytes mutably (used when refreshing the
    /// mirror from the controller).
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Returns the block length in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        BLOCK_LEN
    }
}

impl Default for MemoryBlock {
    fn default() -> Self {
        Self::new()
    }
}
