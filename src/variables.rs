//! Feeder variable definitions and their block layout.
//!
//! This module defines the [`VariableId`] enum which identifies the
//! writable process variables of the feeder loop, and the
//! [`VariableSlot`] record describing where each variable lives inside
//! the write data block and how its value is laid out in the write log.
//!
//! # Layout Overview
//!
//! | Variable | Byte offset | Field type | Log column |
//! |----------|:-----------:|------------|------------|
//! | RotationalSpeed | 0 | 32-bit REAL | RPM |
//! | FeedRate | 4 | 32-bit REAL | Feeder |
//!
//! # Example
//!
//! ```
//! use plc_feeder::VariableId;
//!
//! let slot = VariableId::RotationalSpeed.slot();
//! assert_eq!(slot.offset, 0);
//!
//! // Display the variable name
//! assert_eq!(VariableId::FeedRate.to_string(), "FeedRate");
//! ```

/// Placement of a variable inside the write block and the write log.
///
/// The offset addresses a 32-bit REAL field; the spacing string is the
/// literal run of tabs emitted before the value in the write log so
/// that every variable lands under its own column of the shared header
/// (`DateTime  FrameNumber  RPM  Feeder`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableSlot {
    /// Byte offset of the field inside the write block.
    pub offset: usize,
    /// Tab run separating the frame-number column from the value.
    pub log_spacing: &'static str,
}

/// Writable process variables of the feeder loop.
///
/// The set is closed: every variant has exactly one [`VariableSlot`],
/// so a lookup can never miss. Extending the loop with a new variable
/// means adding a variant and its slot in the same `match`.
///
/// # Example
///
/// ```
/// use plc_feeder::VariableId;
///
/// for id in [VariableId::RotationalSpeed, VariableId::FeedRate] {
///     println!("{} at byte {}", id, id.slot().offset);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableId {
    /// Rotational speed setpoint for the motor controller.
    RotationalSpeed,
    /// Material feed rate setpoint.
    FeedRate,
}

impl VariableId {
    /// All variables, in block-layout order.
    pub const ALL: [VariableId; 2] = [VariableId::RotationalSpeed, VariableId::FeedRate];

    /// Returns the block/log placement of this variable.
    ///
    /// The RotationalSpeed value sits directly after the frame-number
    /// column; FeedRate skips the RPM column, leaving it empty.
    pub fn slot(self) -> VariableSlot {
        match self {
            VariableId::RotationalSpeed => VariableSlot {
                offset: 0,
                log_spacing: "\t",
            },
            VariableId::FeedRate => VariableSlot {
                offset: 4,
                log_spacing: "\t\t\t",
            },
        }
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableId::RotationalSpeed => write!(f, "RotationalSpeed"),
            VariableId::FeedRate => write!(f, "FeedRate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{FIELD_LEN, WRITE_BLOCK_LEN};

    #[test]
    fn test_slot_offsets() {
        assert_eq!(VariableId::RotationalSpeed.slot().offset, 0);
        assert_eq!(VariableId::FeedRate.slot().offset, 4);
    }

    #[test]
    fn test_slots_fit_write_block() {
        for id in VariableId::ALL {
            let slot = id.slot();
            assert!(slot.offset + FIELD_LEN <= WRITE_BLOCK_LEN, "{id} overruns");
        }
    }

    #[test]
    fn test_slots_do_not_overlap() {
        for a in VariableId::ALL {
            for b in VariableId::ALL {
                if a != b {
                    let (sa, sb) = (a.slot(), b.slot());
                    assert!(
                        sa.offset + FIELD_LEN <= sb.offset || sb.offset + FIELD_LEN <= sa.offset,
                        "{a} and {b} overlap"
                    );
                }
            }
        }
    }

    #[test]
    fn test_spacing_non_empty() {
        for id in VariableId::ALL {
            let spacing = id.slot().log_spacing;
            assert!(!spacing.is_empty());
            assert!(spacing.chars().all(|c| c == '\t'));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(VariableId::RotationalSpeed.to_string(), "RotationalSpeed");
        assert_eq!(VariableId::FeedRate.to_string(), "FeedRate");
    }
}
