//! # PLC Feeder Adapter
//!
//! A Rust library bridging a periodic control loop to an S7 controller's
//! shared-memory data blocks, exchanging floating-point process
//! variables (rotational speed, mass, feed rate) over a field-bus
//! client connection while logging every read and write to timestamped
//! tab-separated files.
//!
//! The physical transport is **not** part of this crate: any client
//! implementing the [`FieldBus`] trait (connect, block read/write,
//! disconnect, error text) can drive a controller. The crate focuses on
//! the register mapping, the block codec, the probe/readiness lifecycle
//! and the audit logging.
//!
//! ## Quick Start
//!
//! ```
//! use plc_feeder::{FeederAdapter, FeederConfig, SimFieldBus, VariableId};
//!
//! fn main() -> plc_feeder::Result<()> {
//!     // An in-memory bus stands in for the S7 client here; swap in a
//!     // real FieldBus implementation to talk to hardware.
//!     let bus = SimFieldBus::new()
//!         .with_block(23, vec![0; 8])
//!         .with_block(30, vec![0; 8]);
//!
//!     let dir = tempfile::tempdir().unwrap();
//!     let config = FeederConfig::new("192.168.0.10", dir.path());
//!     let mut feeder = FeederAdapter::connect(config, bus)?;
//!
//!     // Read the current rotational speed and tank mass
//!     let snapshot = feeder.read_feeder();
//!     println!("rpm={} mass={}", snapshot.rpm, snapshot.mass);
//!
//!     // Stage and write a new speed setpoint
//!     feeder.write_feeder(750.0, VariableId::RotationalSpeed);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Data Blocks
//!
//! Two 8-byte blocks are exchanged, each holding two 32-bit REAL
//! fields in S7 byte order:
//!
//! | Block | Id | Offset 0 | Offset 4 |
//! |-------|:--:|----------|----------|
//! | Read  | 23 | RPM (measured) | Mass (measured) |
//! | Write | 30 | RotationalSpeed (setpoint) | FeedRate (setpoint) |
//!
//! ## Lifecycle and Degradation
//!
//! Construction probes both blocks once; each probe independently arms
//! its direction for the adapter's lifetime. Failures never propagate
//! to the control loop:
//!
//! - a failed connect or probe leaves the direction disabled and the
//!   adapter inert but usable;
//! - a disabled read returns the zero [`Snapshot`]; a disabled write is
//!   a no-op;
//! - runtime bus faults are reported via `tracing` and the operation
//!   degrades (stale snapshot, staged-but-unsent value).
//!
//! ## Audit Logs
//!
//! Each adapter owns two TSV files named
//! `<timestamp>_Read_<name>.txt` / `<timestamp>_Write_<name>.txt` with
//! fixed header rows. Every operation appends one line: timestamp,
//! optional frame number from an injected [`FrameSource`], and the
//! values (write lines use per-variable tab spacing so each variable
//! lands under its own header column).

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod block;
mod datalog;
mod error;
mod feeder;
mod fieldbus;
mod variables;

// Public re-exports
pub use block::{
    MemoryBlock, BLOCK_LEN, FIELD_LEN, READ_BLOCK_ID, READ_BLOCK_LEN, WRITE_BLOCK_ID,
    WRITE_BLOCK_LEN,
};
pub use datalog::{
    DataLog, FrameSource, LogDirection, READ_LOG_HEADER, WRITE_LOG_HEADER,
};
pub use error::{FeederError, Result};
pub use feeder::{FeederAdapter, FeederConfig, Snapshot, FEEDER_NAME};
pub use fieldbus::{BusError, BusResult, FieldBus, SimFieldBus};
pub use variables::{VariableId, VariableSlot};
