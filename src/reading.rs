//! Physically-scaled, axis-corrected sensor readings

use chrono::{DateTime, Utc};

/// One three-axis vector in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Axes {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude of the vector
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// One complete reading from a device.
///
/// Produced fresh on every successful update and never merged with earlier
/// readings; consumers see either this reading in full or the previous one
/// in full. Validity flags travel with the data so a consumer can tell
/// which quantities the producing device actually measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Acquisition time
    pub timestamp: DateTime<Utc>,
    /// Angular rate in radians/second
    pub gyro: Axes,
    /// Specific force in g
    pub accel: Axes,
    /// Magnetic field in microtesla
    pub mag: Axes,
    /// Gyro axes hold measured data
    pub gyro_valid: bool,
    /// Accel axes hold measured data
    pub accel_valid: bool,
    /// Mag axes hold measured data
    pub mag_valid: bool,
}
