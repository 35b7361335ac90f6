//! Field-bus client capability.
//!
//! The physical transport (handshake, keep-alive, framing) lives
//! outside this crate. The adapter only needs the five operations of
//! [`FieldBus`]; any S7-capable client can sit behind the trait. Error
//! results are opaque [`BusError`] codes, and the client itself is the
//! authority on what a code means via [`FieldBus::describe_error`] —
//! no transport error strings are hard-coded here.
//!
//! [`SimFieldBus`] is an in-memory implementation used by the tests
//! and usable as a stand-in where no controller is present.

use std::collections::{HashMap, HashSet};

/// Result type for field-bus operations.
pub type BusResult<T> = std::result::Result<T, BusError>;

/// Opaque error code reported by a field-bus client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusError(pub i32);

impl BusError {
    /// Returns the raw client error code.
    pub fn code(self) -> i32 {
        self.0
    }
}

/// Client connection to the controller's field bus.
///
/// Implementations are synchronous and blocking: each call completes
/// before returning. One connection serves both data blocks.
pub trait FieldBus: Send {
    /// Establishes the connection to the controller at `address`,
    /// addressing the CPU by `rack` and `slot`.
    fn connect(&mut self, address: &str, rack: u16, slot: u16) -> BusResult<()>;

    /// Reads `buf.len()` bytes from data block `block_id`, starting at
    /// byte `start`, into `buf`.
    fn read_block(&mut self, block_id: u16, start: usize, buf: &mut [u8]) -> BusResult<()>;

    /// Writes all of `buf` to data block `block_id`, starting at byte
    /// `start`.
    fn write_block(&mut self, block_id: u16, start: usize, buf: &[u8]) -> BusResult<()>;

    /// Tears down the connection. Must be safe to call when not
    /// connected.
    fn disconnect(&mut self);

    /// Renders a client error code as human-readable text.
    fn describe_error(&self, err: BusError) -> String;
}

/// In-memory field bus holding its data blocks in a map.
///
/// Each block is a plain byte vector; reads and writes are bounds
/// checked against it. Failure injection knobs let tests exercise the
/// adapter's degraded paths.
///
/// # Example
///
/// ```
/// use plc_feeder::{FieldBus, SimFieldBus};
///
/// let mut bus = SimFieldBus::new().with_block(23, vec![0; 8]);
/// bus.connect("192.168.0.10", 0, 1).unwrap();
///
/// let mut buf = [0u8; 8];
/// bus.read_block(23, 0, &mut buf).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SimFieldBus {
    blocks: HashMap<u16, Vec<u8>>,
    failing_blocks: HashSet<u16>,
    fail_connect: bool,
    connected: bool,
    reads: u32,
    writes: u32,
    disconnects: u32,
}

/// Error code the simulator reports when a connect is refused.
pub const SIM_ERR_CONNECT: i32 = 0x0001_0000;
/// Error code the simulator reports for an unreachable or short block.
pub const SIM_ERR_BLOCK: i32 = 0x0002_0000;
/// Error code the simulator reports when used while disconnected.
pub const SIM_ERR_NOT_CONNECTED: i32 = 0x0003_0000;

impl SimFieldBus {
    /// Creates a simulator with no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a data block with the given initial contents.
    pub fn with_block(mut self, block_id: u16, bytes: Vec<u8>) -> Self {
        self.blocks.insert(block_id, bytes);
        self
    }

    /// Makes every subsequent `connect` call fail.
    pub fn with_connect_failure(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Makes every access to `block_id` fail.
    pub fn with_block_failure(mut self, block_id: u16) -> Self {
        self.failing_blocks.insert(block_id);
        self
    }

    /// Injects a block failure on an existing simulator.
    pub fn fail_block(&mut self, block_id: u16) {
        self.failing_blocks.insert(block_id);
    }

    /// Removes an injected block failure.
    pub fn clear_block_failure(&mut self, block_id: u16) {
        self.failing_blocks.remove(&block_id);
    }

    /// Returns the current contents of a block, if present.
    pub fn block(&self, block_id: u16) -> Option<&[u8]> {
        self.blocks.get(&block_id).map(Vec::as_slice)
    }

    /// Overwrites the contents of an existing block.
    pub fn seed_block(&mut self, block_id: u16, bytes: &[u8]) {
        self.blocks.insert(block_id, bytes.to_vec());
    }

    /// Number of `read_block` calls that reached the simulator.
    pub fn read_count(&self) -> u32 {
        self.reads
    }

    /// Number of `write_block` calls that reached the simulator.
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    /// Number of `disconnect` calls.
    pub fn disconnect_count(&self) -> u32 {
        self.disconnects
    }

    /// Whether the simulator currently holds a connection.
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl FieldBus for SimFieldBus {
    fn connect(&mut self, _address: &str, _rack: u16, _slot: u16) -> BusResult<()> {
        if self.fail_connect {
            return Err(BusError(SIM_ERR_CONNECT));
        }
        self.connected = true;
        Ok(())
    }

    fn read_block(&mut self, block_id: u16, start: usize, buf: &mut [u8]) -> BusResult<()> {
        if !self.connected {
            return Err(BusError(SIM_ERR_NOT_CONNECTED));
        }
        if self.failing_blocks.contains(&block_id) {
            return Err(BusError(SIM_ERR_BLOCK));
        }
        self.reads += 1;
        let src = self
            .blocks
            .get(&block_id)
            .and_then(|b| b.get(start..start + buf.len()))
            .ok_or(BusError(SIM_ERR_BLOCK))?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write_block(&mut self, block_id: u16, start: usize, buf: &[u8]) -> BusResult<()> {
        if !self.connected {
            return Err(BusError(SIM_ERR_NOT_CONNECTED));
        }
        if self.failing_blocks.contains(&block_id) {
            return Err(BusError(SIM_ERR_BLOCK));
        }
        self.writes += 1;
        let dst = self
            .blocks
            .get_mut(&block_id)
            .and_then(|b| b.get_mut(start..start + buf.len()))
            .ok_or(BusError(SIM_ERR_BLOCK))?;
        dst.copy_from_slice(buf);
        Ok(())
    }

    fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            self.disconnects += 1;
        }
    }

    fn describe_error(&self, err: BusError) -> String {
        match err.code() {
            SIM_ERR_CONNECT => "connection refused".to_string(),
            SIM_ERR_BLOCK => "data block unreachable".to_string(),
            SIM_ERR_NOT_CONNECTED => "not connected".to_string(),
            code => format!("bus error 0x{code:08X}"),
        }
    }
}
