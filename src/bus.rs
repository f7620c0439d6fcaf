//! Bus transport seam
//!
//! All device access goes through [`BusChannel`]. Real transports (platform
//! I2C controllers, USB bridge chips) implement this trait outside the
//! crate; the `sim` feature provides an emulated bus for hostless runs.

/// Register-level access to sub-devices on a shared serial bus.
///
/// Implementations report success as a plain `bool`; the driver layers its
/// error taxonomy on top. The bus is not safe for concurrent callers — all
/// traffic for one bus must come from a single thread.
pub trait BusChannel {
    /// Acquire a handle for the sub-device at `address`.
    ///
    /// Called once per sub-device before any register traffic. Returns
    /// `false` when the bus cannot be located or the address cannot be
    /// claimed.
    fn open(&mut self, address: u8) -> bool;

    /// Write one byte to a register of the sub-device at `address`.
    fn write(&mut self, address: u8, register: u8, value: u8) -> bool;

    /// Read `buffer.len()` bytes starting at `register` from the sub-device
    /// at `address`.
    ///
    /// Multi-byte reads pass the auto-increment address bit
    /// (`register | 0x80`) and must yield consecutive registers.
    fn read(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> bool;
}
