//! Declarative configuration profile for one LSM9DS1 package

use crate::registers::{AG_ADDRESS, MAG_ADDRESS};

/// Configuration profile for one LSM9DS1 package.
///
/// Fields hold raw configuration codes as catalogued by the codec
/// ([`crate::codec`]); they are range-checked when the driver initializes,
/// not when the profile is built, so an invalid profile surfaces as that
/// device's init error instead of a construction panic. The profile is
/// supplied once and never mutated.
#[derive(Debug, Clone, Copy)]
pub struct Lsm9ds1Config {
    /// Accel/gyro sub-device address
    pub ag_address: u8,
    /// Magnetometer sub-device address
    pub mag_address: u8,
    /// Gyro sample-rate code, 0..=5 ({15, 60, 119, 238, 476, 952} Hz)
    pub gyro_sample_rate: u8,
    /// Gyro bandwidth code, 0..=3
    pub gyro_bandwidth: u8,
    /// Gyro full-scale code, 0..=2 ({245, 500, 2000} dps)
    pub gyro_full_scale: u8,
    /// Gyro high-pass cutoff code, 0..=9
    pub gyro_high_pass: u8,
    /// Accel sample-rate code, 0..=6 (0 powers the accelerometer down)
    pub accel_sample_rate: u8,
    /// Accel anti-alias low-pass code, 0..=3
    pub accel_low_pass: u8,
    /// Accel full-scale code, 0..=3 ({±2, ±16, ±4, ±8} g)
    pub accel_full_scale: u8,
    /// Mag sample-rate code, 0..=5 ({0.625 .. 20} Hz)
    pub mag_sample_rate: u8,
    /// Mag full-scale code, 0..=3 ({±4, ±8, ±12, ±16} gauss)
    pub mag_full_scale: u8,
}

impl Default for Lsm9ds1Config {
    /// 119 Hz accel/gyro at the tightest ranges, 20 Hz mag at ±4 gauss,
    /// standard sub-addresses.
    fn default() -> Self {
        Self {
            ag_address: AG_ADDRESS,
            mag_address: MAG_ADDRESS,
            gyro_sample_rate: 2,
            gyro_bandwidth: 0,
            gyro_full_scale: 0,
            gyro_high_pass: 0,
            accel_sample_rate: 3,
            accel_low_pass: 0,
            accel_full_scale: 0,
            mag_sample_rate: 5,
            mag_full_scale: 0,
        }
    }
}
