//! LSM9DS1 device driver
//!
//! Drives one LSM9DS1 package through its initialization state machine and
//! the data-ready/burst-read acquisition protocol. The package exposes two
//! sub-devices on the bus: the accelerometer/gyroscope die and the
//! magnetometer die. Both are owned, verified, and configured by this
//! driver; all traffic goes through the [`BusChannel`] it was given.

use crate::bus::BusChannel;
use crate::codec;
use crate::config::Lsm9ds1Config;
use crate::device::{DeviceState, PolledDevice};
use crate::error::{DeviceError, Result};
use crate::reading::{Axes, SensorReading};
use crate::registers::*;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info};

/// Mandatory settle delay after the boot reset. The first reads after a
/// reset are undefined until the part has rebooted its register file.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Conversion constants attached when the driver reaches `Ready`.
#[derive(Debug, Clone, Copy)]
struct ScaleFactors {
    /// Radians/second per LSB
    gyro_rad_s: f32,
    /// g per LSB
    accel_g: f32,
    /// Microtesla per LSB
    mag_ut: f32,
}

/// Driver for one LSM9DS1 package.
pub struct Lsm9ds1<B: BusChannel> {
    bus: B,
    label: String,
    config: Lsm9ds1Config,
    state: DeviceState,
    scale: Option<ScaleFactors>,
    reading: Option<SensorReading>,
}

impl<B: BusChannel> Lsm9ds1<B> {
    /// Create a driver for the package described by `config`.
    ///
    /// No bus traffic happens here; everything up to and including profile
    /// validation is deferred to [`Lsm9ds1::init`] so that a bad profile or
    /// absent device surfaces as that device's init error.
    pub fn new(bus: B, label: impl Into<String>, config: Lsm9ds1Config) -> Self {
        Self {
            bus,
            label: label.into(),
            config,
            state: DeviceState::Uninitialized,
            scale: None,
            reading: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// The profile this driver was built with.
    pub fn config(&self) -> &Lsm9ds1Config {
        &self.config
    }

    /// Most recent reading, if any update has succeeded.
    pub fn reading(&self) -> Option<SensorReading> {
        self.reading
    }

    /// Nominal sample rate selected by the profile's gyro rate code.
    ///
    /// Derived from the profile alone, so it is available in any state,
    /// including `Faulted`. `None` when the profile holds an illegal code.
    pub fn sample_rate_hz(&self) -> Option<u32> {
        codec::GYRO_SAMPLE_RATES_HZ
            .get(self.config.gyro_sample_rate as usize)
            .copied()
    }

    /// Device-side sample period (1,000,000 µs / rate).
    pub fn sample_interval(&self) -> Option<Duration> {
        self.sample_rate_hz()
            .map(|hz| Duration::from_micros(1_000_000 / hz as u64))
    }

    /// Suggested host polling cadence, 400 / rate in whole milliseconds.
    /// Truncates: rates of 476 Hz and up poll without any delay.
    pub fn poll_interval(&self) -> Option<Duration> {
        self.sample_rate_hz()
            .map(|hz| Duration::from_millis((400 / hz) as u64))
    }

    /// Run the initialization state machine.
    ///
    /// Connects both sub-devices, resets the part, waits out the settle
    /// delay, verifies both identity registers, and writes the
    /// configuration registers in their required order. Scale factors are
    /// attached together with the transition to `Ready`.
    ///
    /// Any failure leaves the driver in `Faulted`, which is terminal for
    /// this instance; the error is returned to the caller.
    pub fn init(&mut self) -> Result<()> {
        debug!(device = %self.label, "initializing");

        match self.run_init() {
            Ok(scale) => {
                self.scale = Some(scale);
                self.state = DeviceState::Ready;
                info!(
                    device = %self.label,
                    sample_rate_hz = self.sample_rate_hz(),
                    "device ready"
                );
                Ok(())
            }
            Err(e) => {
                self.scale = None;
                self.state = DeviceState::Faulted;
                Err(e)
            }
        }
    }

    fn run_init(&mut self) -> Result<ScaleFactors> {
        let ag = self.config.ag_address;
        let mag = self.config.mag_address;

        self.state = DeviceState::Connecting;
        if !self.bus.open(ag) {
            return Err(DeviceError::ConnectionFailed(ag));
        }
        if !self.bus.open(mag) {
            return Err(DeviceError::ConnectionFailed(mag));
        }

        self.state = DeviceState::Booting;
        if !self.bus.write(ag, CTRL_REG8, CTRL8_SW_RESET | CTRL8_IF_ADD_INC) {
            return Err(DeviceError::BootFailed);
        }
        std::thread::sleep(SETTLE_DELAY);

        self.state = DeviceState::VerifyingIdentity;
        self.verify_identity(ag, WHO_AM_I_AG_VALUE)?;
        self.verify_identity(mag, WHO_AM_I_M_VALUE)?;

        self.state = DeviceState::Configuring;

        // Encode the whole profile up front; an illegal code must fail
        // before any configuration write reaches the part.
        let gyro = codec::encode_gyro_ctrl(
            self.config.gyro_sample_rate,
            self.config.gyro_bandwidth,
            self.config.gyro_full_scale,
        )?;
        let high_pass = codec::encode_high_pass_ctrl(self.config.gyro_high_pass)?;
        let accel = codec::encode_accel_ctrl(
            self.config.accel_sample_rate,
            self.config.accel_low_pass,
            self.config.accel_full_scale,
        )?;
        let mag_ctrl = codec::encode_mag_ctrl(
            self.config.mag_sample_rate,
            self.config.mag_full_scale,
        )?;

        self.config_write(ag, CTRL_REG1_G, gyro.byte)?;
        self.config_write(ag, CTRL_REG3_G, high_pass)?;
        self.config_write(ag, CTRL_REG6_XL, accel.byte)?;
        // CTRL_REG7_XL stays at the filter-bypass value. Enabling the
        // high-resolution filter chain here hangs the part until a power
        // cycle; do not write anything else without hardware verification.
        self.config_write(ag, CTRL_REG7_XL, 0x00)?;
        self.config_write(mag, CTRL_REG1_M, mag_ctrl.rate_byte)?;
        self.config_write(mag, CTRL_REG2_M, mag_ctrl.scale_byte)?;
        self.config_write(mag, CTRL_REG3_M, CTRL3_M_CONTINUOUS)?;

        Ok(ScaleFactors {
            gyro_rad_s: gyro.scale_rad_s,
            accel_g: accel.scale_g,
            mag_ut: mag_ctrl.scale_ut,
        })
    }

    /// Poll the device once.
    ///
    /// # Returns
    /// * `Ok(true)` - new accel+gyro data was ready; a fresh reading was
    ///   published
    /// * `Ok(false)` - no new data yet (expected when polling faster than
    ///   the configured rate)
    /// * `Err(DeviceError)` - a bus read failed, or the driver is not
    ///   `Ready`
    ///
    /// A read failure does not change the driver state; one bus glitch
    /// must not fault an otherwise healthy device.
    pub fn update(&mut self) -> Result<bool> {
        let scale = match self.scale {
            Some(s) if self.state == DeviceState::Ready => s,
            _ => return Err(DeviceError::NotInitiated),
        };

        let ag = self.config.ag_address;

        let status = self.read_byte(ag, STATUS_REG)?;
        if status & (STATUS_XLDA | STATUS_GDA) != (STATUS_XLDA | STATUS_GDA) {
            return Ok(false);
        }

        let gyro_raw = self.read_axes(ag, OUT_X_L_G)?;
        let accel_raw = self.read_axes(ag, OUT_X_L_XL)?;
        let mag_raw = self.read_axes(self.config.mag_address, OUT_X_L_M)?;

        // Sign corrections for the mounting orientation of the two dies
        // relative to the documented reference frame; applied on every
        // read, never configurable.
        let gyro = Axes::new(
            gyro_raw[0] as f32 * scale.gyro_rad_s,
            gyro_raw[1] as f32 * scale.gyro_rad_s,
            -(gyro_raw[2] as f32) * scale.gyro_rad_s,
        );
        let accel = Axes::new(
            -(accel_raw[0] as f32) * scale.accel_g,
            -(accel_raw[1] as f32) * scale.accel_g,
            accel_raw[2] as f32 * scale.accel_g,
        );
        let mag = Axes::new(
            -(mag_raw[0] as f32) * scale.mag_ut,
            mag_raw[1] as f32 * scale.mag_ut,
            -(mag_raw[2] as f32) * scale.mag_ut,
        );

        self.reading = Some(SensorReading {
            timestamp: Utc::now(),
            gyro,
            accel,
            mag,
            gyro_valid: true,
            accel_valid: true,
            mag_valid: true,
        });

        Ok(true)
    }

    fn verify_identity(&mut self, address: u8, expected: u8) -> Result<()> {
        let mut buf = [0u8; 1];
        if !self.bus.read(address, WHO_AM_I, &mut buf) {
            // Unreadable identity registers report as a mismatch against 0x00.
            return Err(DeviceError::IdentityMismatch {
                address,
                expected,
                found: 0x00,
            });
        }
        if buf[0] != expected {
            return Err(DeviceError::IdentityMismatch {
                address,
                expected,
                found: buf[0],
            });
        }
        Ok(())
    }

    fn config_write(&mut self, address: u8, register: u8, value: u8) -> Result<()> {
        if !self.bus.write(address, register, value) {
            return Err(DeviceError::ConfigWriteRejected(register));
        }
        Ok(())
    }

    /// Read a single register byte.
    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        if !self.bus.read(address, register, &mut buf) {
            return Err(DeviceError::ReadFailed(register));
        }
        Ok(buf[0])
    }

    /// Burst-read one axis triple as little-endian signed 16-bit values.
    fn read_axes(&mut self, address: u8, register: u8) -> Result<[i16; 3]> {
        let mut buf = [0u8; 6];
        if !self.bus.read(address, register | AUTO_INCREMENT, &mut buf) {
            return Err(DeviceError::ReadFailed(register));
        }
        Ok([
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ])
    }
}

impl<B: BusChannel + Send> PolledDevice for Lsm9ds1<B> {
    fn label(&self) -> &str {
        &self.label
    }

    fn init(&mut self) -> Result<()> {
        Lsm9ds1::init(self)
    }

    fn update(&mut self) -> Result<bool> {
        Lsm9ds1::update(self)
    }

    fn reading(&self) -> Option<SensorReading> {
        Lsm9ds1::reading(self)
    }

    fn initiated(&self) -> bool {
        self.state == DeviceState::Ready
    }
}
