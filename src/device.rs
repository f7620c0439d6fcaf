//! Device lifecycle states and the polling capability

use crate::error::Result;
use crate::reading::SensorReading;

/// Initialization lifecycle of one device driver.
///
/// States advance strictly forward during init; any failure lands in
/// `Faulted`, which is terminal for that driver instance. Recovery means
/// building a fresh driver — nothing retries automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Uninitialized,
    Connecting,
    Booting,
    VerifyingIdentity,
    Configuring,
    Ready,
    Faulted,
}

/// Capability the polling supervisor requires of every device it owns.
///
/// The supervisor holds trait objects, never concrete driver types, so
/// device-specific failures stay contained to the device they came from.
pub trait PolledDevice: Send {
    /// Stable name used to key snapshots and log events.
    fn label(&self) -> &str;

    /// One-shot initialization. A failure is terminal for this instance.
    fn init(&mut self) -> Result<()>;

    /// Poll once. `Ok(true)` means a new reading was produced; `Ok(false)`
    /// means the device had no fresh sample yet.
    fn update(&mut self) -> Result<bool>;

    /// Most recent reading, if any update has succeeded.
    fn reading(&self) -> Option<SensorReading>;

    /// True once `init` has completed successfully.
    fn initiated(&self) -> bool;
}
