//! Multi-sensor acquisition hub for LSM9DS1 inertial measurement units
//!
//! This library drives one or more LSM9DS1 9-axis IMU packages attached to a
//! shared serial bus. A declarative configuration profile becomes a sequence
//! of register writes, raw register bytes become physically-scaled and
//! axis-corrected readings, and a polling supervisor runs every attached
//! device on one cadence while isolating per-device failures.
//!
//! Bus transports plug in through the [`BusChannel`] trait; the `sim` feature
//! (on by default) ships an emulated bus so everything below runs without
//! hardware.
//!
//! # Quick Start
//!
//! ## Driving One Device
//! ```no_run
//! use i2c_sensor_hub::{Lsm9ds1, Lsm9ds1Config, SimBus};
//!
//! let mut imu = Lsm9ds1::new(SimBus::default(), "imu0", Lsm9ds1Config::default());
//! imu.init()?;
//!
//! // Poll until the device reports a fresh sample
//! while !imu.update()? {}
//!
//! let reading = imu.reading().unwrap();
//! println!("Accel Z: {:.2} g", reading.accel.z);
//! println!("Gyro X:  {:.3} rad/s", reading.gyro.x);
//! println!("Mag Y:   {:.1} µT", reading.mag.y);
//! # Ok::<(), i2c_sensor_hub::DeviceError>(())
//! ```
//!
//! ## Supervised Polling
//! ```no_run
//! use i2c_sensor_hub::{Lsm9ds1, Lsm9ds1Config, PolledDevice, SensorHub, SimBus};
//! use std::time::Duration;
//!
//! let bus = SimBus::default();
//! let imu = Lsm9ds1::new(bus, "imu0", Lsm9ds1Config::default());
//!
//! // The hub owns its devices: one worker thread initializes each in turn,
//! // then polls them all until the hub is stopped or dropped.
//! let devices: Vec<Box<dyn PolledDevice>> = vec![Box::new(imu)];
//! let mut hub = SensorHub::start(devices);
//!
//! std::thread::sleep(Duration::from_secs(2));
//!
//! // Snapshots are safe to read from any thread and never touch the bus.
//! let snap = hub.snapshot("imu0").unwrap();
//! println!("initiated: {} | rate: {} Hz", snap.initiated, snap.sample_rate);
//! if let Some(reading) = snap.reading {
//!     println!("Accel Z: {:.2} g", reading.accel.z);
//! }
//!
//! hub.stop();
//! ```
//!
//! ## Custom Configuration
//! ```no_run
//! use i2c_sensor_hub::{Lsm9ds1, Lsm9ds1Config, SimBus};
//!
//! // 476 Hz gyro/accel at ±500 dps / ±8 g, mag at ±8 gauss
//! let config = Lsm9ds1Config {
//!     gyro_sample_rate: 4,
//!     gyro_full_scale: 1,
//!     accel_sample_rate: 5,
//!     accel_full_scale: 3,
//!     mag_full_scale: 1,
//!     ..Lsm9ds1Config::default()
//! };
//!
//! let mut imu = Lsm9ds1::new(SimBus::default(), "imu0", config);
//! imu.init()?;
//! # Ok::<(), i2c_sensor_hub::DeviceError>(())
//! ```

pub mod bus;
pub mod codec;
pub mod config;
pub mod device;
pub mod error;
pub mod reading;
pub mod registers;

pub mod lsm9ds1;
pub mod supervisor;

#[cfg(feature = "sim")]
pub mod sim;

// Re-export public API
pub use bus::BusChannel;
pub use config::Lsm9ds1Config;
pub use device::{DeviceState, PolledDevice};
pub use error::{DeviceError, Result};
pub use lsm9ds1::Lsm9ds1;
pub use reading::{Axes, SensorReading};
pub use supervisor::{DeviceSnapshot, SensorHub};

#[cfg(feature = "sim")]
pub use sim::SimBus;
