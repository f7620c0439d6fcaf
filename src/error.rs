//! Error types for the sensor acquisition engine

use thiserror::Error;

/// Error type for device driver and supervisor operations
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Illegal enumerated configuration code
    #[error("Invalid {setting} code: {code}")]
    InvalidConfig { setting: &'static str, code: u8 },

    /// Bus sub-device handle could not be acquired
    #[error("Failed to open bus sub-device at address 0x{0:02X}")]
    ConnectionFailed(u8),

    /// Reset write rejected during boot
    #[error("Reset write rejected during boot")]
    BootFailed,

    /// Wrong or unreadable identity byte
    #[error("Invalid identity response at 0x{address:02X}: expected 0x{expected:02X}, got 0x{found:02X}")]
    IdentityMismatch {
        address: u8,
        expected: u8,
        found: u8,
    },

    /// A configuration register write was rejected
    #[error("Configuration write to register 0x{0:02X} rejected")]
    ConfigWriteRejected(u8),

    /// A bus read failed during acquisition
    #[error("Bus read of register 0x{0:02X} failed")]
    ReadFailed(u8),

    /// Update called before the driver reached Ready
    #[error("Device not initiated")]
    NotInitiated,
}

/// Result type for sensor hub operations
pub type Result<T> = std::result::Result<T, DeviceError>;
