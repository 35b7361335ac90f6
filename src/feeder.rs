//! Feeder adapter bridging the control loop to the controller's data
//! blocks.
//!
//! This module provides the [`FeederAdapter`] struct, which owns one
//! field-bus connection, local mirrors of the read and write data
//! blocks, and the two audit logs.
//!
//! # Lifecycle
//!
//! Construction connects the bus and probe-reads both blocks once to
//! decide what the adapter may do for the rest of its life:
//!
//! - connect failure leaves the adapter inert (both directions
//!   disabled) — construction itself still succeeds;
//! - a failed probe disconnects and permanently disables the
//!   corresponding direction;
//! - a successful probe arms `read_feeder` / `write_feeder`.
//!
//! The readiness flags are never reset afterward; a transient runtime
//! fault does not disable a direction.
//!
//! # Example
//!
//! ```
//! use plc_feeder::{FeederAdapter, FeederConfig, SimFieldBus, VariableId};
//!
//! let bus = SimFieldBus::new()
//!     .with_block(23, vec![0; 8])
//!     .with_block(30, vec![0; 8]);
//! let dir = tempfile::tempdir().unwrap();
//! let config = FeederConfig::new("192.168.0.10", dir.path());
//!
//! let mut feeder = FeederAdapter::connect(config, bus)?;
//! let snapshot = feeder.read_feeder();
//! println!("rpm={} mass={}", snapshot.rpm, snapshot.mass);
//!
//! feeder.write_feeder(750.0, VariableId::RotationalSpeed);
//! # Ok::<(), plc_feeder::FeederError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::block::{MemoryBlock, READ_BLOCK_ID, WRITE_BLOCK_ID};
use crate::datalog::{frame_field, line_timestamp, DataLog, FrameSource, LogDirection};
use crate::error::{FeederError, Result};
use crate::fieldbus::FieldBus;
use crate::variables::VariableId;

/// Default adapter name, used in log file names.
pub const FEEDER_NAME: &str = "PLC";

/// Controller-side name of the read block.
const READ_BLOCK_NAME: &str = "DB_S7RemComm_Read";

/// Controller-side name of the write block.
const WRITE_BLOCK_NAME: &str = "DB_S7RemComm_Write";

/// Byte offset of the rotational-speed field in the read block.
const RPM_OFFSET: usize = 0;

/// Byte offset of the mass field in the read block.
const MASS_OFFSET: usize = 4;

/// Configuration for constructing a feeder adapter.
#[derive(Debug, Clone)]
pub struct FeederConfig {
    /// Controller address.
    pub address: String,
    /// CPU rack number.
    pub rack: u16,
    /// CPU slot number.
    pub slot: u16,
    /// Adapter name, embedded in log file names.
    pub name: String,
    /// Directory receiving the read and write logs.
    pub data_out_dir: PathBuf,
}

impl FeederConfig {
    /// Creates a configuration with the default name (`PLC`) and CPU
    /// addressing (rack 0, slot 1).
    ///
    /// # Example
    ///
    /// ```
    /// use plc_feeder::FeederConfig;
    ///
    /// let config = FeederConfig::new("192.168.0.10", "/var/log/feeder");
    /// assert_eq!(config.rack, 0);
    /// assert_eq!(config.slot, 1);
    /// ```
    pub fn new(address: impl Into<String>, data_out_dir: impl Into<PathBuf>) -> Self {
        Self {
            address: address.into(),
            rack: 0,
            slot: 1,
            name: FEEDER_NAME.to_string(),
            data_out_dir: data_out_dir.into(),
        }
    }

    /// Sets a custom adapter name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a custom CPU rack number.
    pub fn with_rack(mut self, rack: u16) -> Self {
        self.rack = rack;
        self
    }

    /// Sets a custom CPU slot number.
    pub fn with_slot(mut self, slot: u16) -> Self {
        self.slot = slot;
        self
    }
}

/// One reading of the feeder's process variables.
///
/// Value object created fresh by every [`FeederAdapter::read_feeder`]
/// call; zero-valued when the read path is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapshot {
    /// Rotational speed measured by the motor controller.
    pub rpm: f64,
    /// Mass of material in the tank measured by the controller.
    pub mass: f64,
}

impl Snapshot {
    /// Creates a snapshot from the two readings.
    pub fn new(rpm: f64, mass: f64) -> Self {
        Self { rpm, mass }
    }
}

/// Adapter exchanging feeder process variables with the controller.
///
/// Owns the bus connection, the block mirrors and the audit logs.
/// Single-threaded and blocking: every call runs to completion. The
/// adapter never fails loudly after construction — degraded paths skip
/// the side effect and report through the diagnostic log.
pub struct FeederAdapter<C: FieldBus> {
    bus: C,
    read_block: MemoryBlock,
    write_block: MemoryBlock,
    read_ready: bool,
    write_ready: bool,
    connected: bool,
    read_log: DataLog,
    write_log: DataLog,
    frame_source: Option<FrameSource>,
}

impl<C: FieldBus> FeederAdapter<C> {
    /// Opens the audit logs, connects the bus and probes both data
    /// blocks.
    ///
    /// Bus-level failures (connect or probe) do not fail construction:
    /// they are reported through the diagnostic log and leave the
    /// affected direction permanently disabled.
    ///
    /// # Errors
    ///
    /// Returns an error only if the audit log files cannot be created.
    pub fn connect(config: FeederConfig, bus: C) -> Result<Self> {
        let read_log = DataLog::create(&config.data_out_dir, &config.name, LogDirection::Read)?;
        let write_log = DataLog::create(&config.data_out_dir, &config.name, LogDirection::Write)?;

        let mut feeder = Self {
            bus,
            read_block: MemoryBlock::new(),
            write_block: MemoryBlock::new(),
            read_ready: false,
            write_ready: false,
            connected: false,
            read_log,
            write_log,
            frame_source: None,
        };

        if let Err(err) = feeder
            .bus
            .connect(&config.address, config.rack, config.slot)
        {
            let detail = feeder.bus.describe_error(err);
            warn!("{}", FeederError::connect(detail));
            return Ok(feeder);
        }
        feeder.connected = true;
        info!(address = %config.address, "connected");

        // Probe whether the whole read block is accessible
        match feeder
            .bus
            .read_block(READ_BLOCK_ID, 0, feeder.read_block.as_mut_slice())
        {
            Ok(()) => {
                info!("{READ_BLOCK_NAME} accessed");
                feeder.read_ready = true;
            }
            Err(err) => {
                let detail = feeder.bus.describe_error(err);
                warn!("{}", FeederError::probe(READ_BLOCK_NAME, detail));
                feeder.bus.disconnect();
                feeder.connected = false;
                return Ok(feeder);
            }
        }

        // Probe whether the whole write block is accessible
        match feeder
            .bus
            .read_block(WRITE_BLOCK_ID, 0, feeder.write_block.as_mut_slice())
        {
            Ok(()) => {
                info!("{WRITE_BLOCK_NAME} accessed");
                feeder.write_ready = true;
            }
            Err(err) => {
                let detail = feeder.bus.describe_error(err);
                warn!("{}", FeederError::probe(WRITE_BLOCK_NAME, detail));
                feeder.bus.disconnect();
                feeder.connected = false;
            }
        }

        Ok(feeder)
    }

    /// Installs a frame-number source, invoked once per logged
    /// operation.
    pub fn with_frame_source(mut self, source: FrameSource) -> Self {
        self.frame_source = Some(source);
        self
    }

    /// Reads the current process variables from the controller.
    ///
    /// When the read direction is disabled this returns the zero
    /// snapshot without touching the bus. Otherwise the read block is
    /// refreshed, both fields are decoded, and one line is appended to
    /// the read log. A failed refresh is reported through the
    /// diagnostic log; the snapshot then decodes the last successfully
    /// read contents.
    pub fn read_feeder(&mut self) -> Snapshot {
        if !self.read_ready {
            return Snapshot::default();
        }

        if let Err(err) = self
            .bus
            .read_block(READ_BLOCK_ID, 0, self.read_block.as_mut_slice())
        {
            let detail = self.bus.describe_error(err);
            warn!("{}", FeederError::read(detail));
        }

        // Offsets are block-layout constants; decode cannot miss
        let rpm = f64::from(self.read_block.f32_at(RPM_OFFSET).unwrap_or(0.0));
        let mass = f64::from(self.read_block.f32_at(MASS_OFFSET).unwrap_or(0.0));
        debug!(rpm, "actual RPM value");
        debug!(mass, "actual mass value");

        let line = format!(
            "{}\t{}\t{rpm}\t{mass}",
            line_timestamp(),
            frame_field(self.frame_source.as_ref())
        );
        if let Err(err) = self.read_log.append(&line) {
            warn!("read log append failed: {err}");
        }

        Snapshot::new(rpm, mass)
    }

    /// Stages `new_val` into the write block at the variable's slot and
    /// writes the whole block back to the controller.
    ///
    /// A no-op when the write direction is disabled. Other staged
    /// fields keep their values. A bus-level write failure is reported
    /// through the diagnostic log, the staged value stays in the block
    /// mirror for the next attempt, and the write-log line is appended
    /// regardless.
    pub fn write_feeder(&mut self, new_val: f64, index: VariableId) {
        if !self.write_ready {
            return;
        }

        let slot = index.slot();
        if let Err(err) = self.write_block.set_f32_at(slot.offset, new_val as f32) {
            warn!("{err}");
            return;
        }

        if let Err(err) = self
            .bus
            .write_block(WRITE_BLOCK_ID, 0, self.write_block.as_slice())
        {
            let detail = self.bus.describe_error(err);
            warn!("{}", FeederError::write(detail));
        }

        // Frame number, then the variable's tab run so its value lands
        // under the right header column
        let line = format!(
            "{}\t{}{}{new_val}",
            line_timestamp(),
            frame_field(self.frame_source.as_ref()),
            slot.log_spacing
        );
        if let Err(err) = self.write_log.append(&line) {
            warn!("write log append failed: {err}");
        }
    }

    /// Disconnects the bus if the adapter ever reached a connected
    /// state. Idempotent; a no-op after an unsuccessful construction.
    pub fn close(&mut self) {
        if self.connected {
            self.bus.disconnect();
            self.connected = false;
            info!("disconnecting");
        }
    }

    /// Whether the read direction is armed.
    pub fn read_ready(&self) -> bool {
        self.read_ready
    }

    /// Whether the write direction is armed.
    pub fn write_ready(&self) -> bool {
        self.write_ready
    }

    /// Returns a reference to the underlying bus client.
    pub fn bus(&self) -> &C {
        &self.bus
    }

    /// Returns a mutable reference to the underlying bus client.
    pub fn bus_mut(&mut self) -> &mut C {
        &mut self.bus
    }

    /// Path of the read audit log.
    pub fn read_log_path(&self) -> &Path {
        self.read_log.path()
    }

    /// Path of the write audit log.
    pub fn write_log_path(&self) -> &Path {
        self.write_log.path()
    }
}

impl<C: FieldBus> Drop for FeederAdapter<C> {
    fn drop(&mut self) {
        self.close();
    }
}
