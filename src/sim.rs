//! Simulated bus backend
//!
//! Emulates LSM9DS1 packages behind [`BusChannel`] so the monitor binary,
//! doc examples, and development on machines without hardware all work.
//! Data-ready pacing follows whatever output data rate the driver writes
//! into CTRL_REG1_G, and the synthesized motion looks like a device sitting
//! on a desk: gravity on the accel Z axis, a slow gyro wobble, an
//! earth-strength magnetic field.
//!
//! Handles are cheap clones sharing one emulated bus, so several drivers
//! can sit on the same `SimBus` the way they would share a physical bus.

use crate::bus::BusChannel;
use crate::codec::GYRO_SAMPLE_RATES_HZ;
use crate::registers::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// 1 g in raw counts at the default ±2 g range
const ACCEL_RAW_1G: f32 = 16393.0;

/// Gyro wobble amplitude in raw counts (≈5 dps at ±245 dps)
const GYRO_RAW_AMP: f32 = 571.0;

/// Accel tilt wobble amplitude in raw counts (≈0.05 g)
const ACCEL_RAW_AMP: f32 = 820.0;

/// Horizontal earth-field component in raw counts at ±4 gauss (≈20 µT)
const MAG_RAW_H: f32 = 1430.0;

/// Vertical earth-field component in raw counts at ±4 gauss (≈44 µT)
const MAG_RAW_V: f32 = 3140.0;

/// Phase advance per produced sample
const PHASE_STEP: f32 = 0.03;

struct SimPackage {
    ag_address: u8,
    mag_address: u8,
    last_sample: Instant,
    phase: f32,
}

struct SimState {
    registers: HashMap<(u8, u8), u8>,
    packages: Vec<SimPackage>,
}

/// Emulated shared bus holding any number of LSM9DS1 packages.
#[derive(Clone)]
pub struct SimBus {
    state: Arc<Mutex<SimState>>,
}

impl SimBus {
    /// Empty bus with no packages attached.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState {
                registers: HashMap::new(),
                packages: Vec::new(),
            })),
        }
    }

    /// Attach an emulated package answering on this address pair.
    pub fn with_package(self, ag_address: u8, mag_address: u8) -> Self {
        self.lock().packages.push(SimPackage {
            ag_address,
            mag_address,
            last_sample: Instant::now(),
            phase: 0.0,
        });
        self
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SimBus {
    /// Bus with a single package at the standard sub-addresses.
    fn default() -> Self {
        Self::new().with_package(AG_ADDRESS, MAG_ADDRESS)
    }
}

impl BusChannel for SimBus {
    fn open(&mut self, address: u8) -> bool {
        self.lock().package_index(address).is_some()
    }

    fn write(&mut self, address: u8, register: u8, value: u8) -> bool {
        let mut state = self.lock();
        if state.package_index(address).is_none() {
            return false;
        }
        state.registers.insert((address, register), value);
        true
    }

    fn read(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> bool {
        self.lock()
            .read(address, register & !AUTO_INCREMENT, buffer)
    }
}

impl SimState {
    fn package_index(&self, address: u8) -> Option<usize> {
        self.packages
            .iter()
            .position(|p| p.ag_address == address || p.mag_address == address)
    }

    fn read(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> bool {
        let idx = match self.package_index(address) {
            Some(idx) => idx,
            None => return false,
        };
        let is_ag = self.packages[idx].ag_address == address;
        let phase = self.packages[idx].phase;

        match register {
            WHO_AM_I => {
                let identity = if is_ag {
                    WHO_AM_I_AG_VALUE
                } else {
                    WHO_AM_I_M_VALUE
                };
                fill_byte(buffer, identity);
            }
            STATUS_REG if is_ag => {
                let status = if self.sample_elapsed(idx) {
                    STATUS_XLDA | STATUS_GDA
                } else {
                    0x00
                };
                fill_byte(buffer, status);
            }
            OUT_X_L_G if is_ag => {
                write_axes(
                    buffer,
                    [
                        (phase.sin() * GYRO_RAW_AMP) as i16,
                        (phase.cos() * GYRO_RAW_AMP) as i16,
                        ((phase * 0.5).sin() * GYRO_RAW_AMP * 0.3) as i16,
                    ],
                );
                // The gyro burst drains this sample; the next one becomes
                // ready a full period later.
                let package = &mut self.packages[idx];
                package.last_sample = Instant::now();
                package.phase = (package.phase + PHASE_STEP) % std::f32::consts::TAU;
            }
            OUT_X_L_XL if is_ag => {
                write_axes(
                    buffer,
                    [
                        (phase.sin() * ACCEL_RAW_AMP) as i16,
                        (phase.cos() * ACCEL_RAW_AMP) as i16,
                        ACCEL_RAW_1G as i16,
                    ],
                );
            }
            OUT_X_L_M if !is_ag => {
                write_axes(
                    buffer,
                    [
                        (MAG_RAW_H * (phase * 0.2).cos()) as i16,
                        (MAG_RAW_H * (phase * 0.2).sin()) as i16,
                        -MAG_RAW_V as i16,
                    ],
                );
            }
            _ => {
                let stored = self
                    .registers
                    .get(&(address, register))
                    .copied()
                    .unwrap_or(0x00);
                fill_byte(buffer, stored);
            }
        }

        true
    }

    /// True when one configured sample period has passed since the last
    /// drained sample. Before the driver configures a data rate there is
    /// no period, so nothing is ever ready.
    fn sample_elapsed(&self, idx: usize) -> bool {
        match self.sample_period(idx) {
            Some(period) => self.packages[idx].last_sample.elapsed() >= period,
            None => false,
        }
    }

    fn sample_period(&self, idx: usize) -> Option<Duration> {
        let ag = self.packages[idx].ag_address;
        let ctrl = *self.registers.get(&(ag, CTRL_REG1_G))?;
        let odr = (ctrl >> 5) as usize;
        if odr == 0 || odr > GYRO_SAMPLE_RATES_HZ.len() {
            return None;
        }
        let hz = GYRO_SAMPLE_RATES_HZ[odr - 1];
        Some(Duration::from_micros(1_000_000 / hz as u64))
    }
}

fn fill_byte(buffer: &mut [u8], value: u8) {
    if let Some(first) = buffer.first_mut() {
        *first = value;
    }
}

fn write_axes(buffer: &mut [u8], axes: [i16; 3]) {
    for (chunk, value) in buffer.chunks_exact_mut(2).zip(axes) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
}
