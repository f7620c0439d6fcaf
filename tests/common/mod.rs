//! Mock bus implementation for testing the LSM9DS1 driver

use i2c_sensor_hub::registers::{
    AG_ADDRESS, AUTO_INCREMENT, MAG_ADDRESS, OUT_X_L_G, OUT_X_L_M, OUT_X_L_XL, STATUS_REG,
    WHO_AM_I, WHO_AM_I_AG_VALUE, WHO_AM_I_M_VALUE,
};
use i2c_sensor_hub::BusChannel;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Records operations performed on the mock bus
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Sub-device handle acquisition
    Open { address: u8 },
    /// Register write
    Write { address: u8, register: u8, value: u8 },
    /// Register read; `register` is the raw byte passed on the bus, so the
    /// auto-increment bit is visible to assertions
    Read { address: u8, register: u8, len: usize },
}

/// Shared state for the mock bus (uses interior mutability)
struct MockState {
    /// Simulated register values, keyed (address, register)
    registers: HashMap<(u8, u8), u8>,

    /// Addresses that answer on the bus
    present: Vec<u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection
    fail_next_read: bool,
    fail_next_write: bool,
    fail_reads_of: Option<(u8, u8)>,
    fail_writes_to: Option<(u8, u8)>,
}

impl MockState {
    fn new() -> Self {
        let mut registers = HashMap::new();
        registers.insert((AG_ADDRESS, WHO_AM_I), WHO_AM_I_AG_VALUE);
        registers.insert((MAG_ADDRESS, WHO_AM_I), WHO_AM_I_M_VALUE);

        Self {
            registers,
            present: vec![AG_ADDRESS, MAG_ADDRESS],
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            fail_reads_of: None,
            fail_writes_to: None,
        }
    }
}

/// Mock bus: an LSM9DS1 package at the standard address pair, with scripted
/// register values, an operation log, and failure injection.
///
/// Clones share one underlying bus, so a test can keep a handle while the
/// driver owns another.
#[derive(Clone)]
pub struct MockBus {
    state: Rc<RefCell<MockState>>,
}

impl MockBus {
    /// Bus with both dies present and answering their identity registers.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Set a register value.
    pub fn set_register(&self, address: u8, register: u8, value: u8) {
        self.state
            .borrow_mut()
            .registers
            .insert((address, register), value);
    }

    /// Get a register value.
    #[allow(dead_code)]
    pub fn register(&self, address: u8, register: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&(address, register))
            .copied()
            .unwrap_or(0)
    }

    /// Override the identity byte a die answers with.
    pub fn set_identity(&self, address: u8, value: u8) {
        self.set_register(address, WHO_AM_I, value);
    }

    /// Make an address stop answering; `open` for it will fail.
    pub fn disconnect(&self, address: u8) {
        self.state.borrow_mut().present.retain(|a| *a != address);
    }

    /// Set the accel/gyro die status register.
    pub fn set_status(&self, value: u8) {
        self.set_register(AG_ADDRESS, STATUS_REG, value);
    }

    /// Set raw gyro output (little-endian, X/Y/Z).
    pub fn set_gyro_data(&self, x: i16, y: i16, z: i16) {
        self.set_axes(AG_ADDRESS, OUT_X_L_G, x, y, z);
    }

    /// Set raw accel output.
    pub fn set_accel_data(&self, x: i16, y: i16, z: i16) {
        self.set_axes(AG_ADDRESS, OUT_X_L_XL, x, y, z);
    }

    /// Set raw mag output.
    pub fn set_mag_data(&self, x: i16, y: i16, z: i16) {
        self.set_axes(MAG_ADDRESS, OUT_X_L_M, x, y, z);
    }

    fn set_axes(&self, address: u8, base: u8, x: i16, y: i16, z: i16) {
        let mut state = self.state.borrow_mut();
        for (i, value) in [x, y, z].into_iter().enumerate() {
            let [lo, hi] = value.to_le_bytes();
            state.registers.insert((address, base + i as u8 * 2), lo);
            state.registers.insert((address, base + i as u8 * 2 + 1), hi);
        }
    }

    /// Inject a read failure on the next read operation.
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation.
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Fail every read of one register (pass the base register; the
    /// auto-increment bit is stripped before matching).
    pub fn fail_reads_of(&self, address: u8, register: u8) {
        self.state.borrow_mut().fail_reads_of = Some((address, register));
    }

    /// Clear a targeted read failure.
    pub fn clear_read_failure(&self) {
        self.state.borrow_mut().fail_reads_of = None;
    }

    /// Fail every write to one register.
    pub fn fail_writes_to(&self, address: u8, register: u8) {
        self.state.borrow_mut().fail_writes_to = Some((address, register));
    }

    /// Get the operations log.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log.
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// All writes in issue order, as (address, register, value).
    pub fn writes(&self) -> Vec<(u8, u8, u8)> {
        self.operations()
            .iter()
            .filter_map(|op| match op {
                Operation::Write {
                    address,
                    register,
                    value,
                } => Some((*address, *register, *value)),
                _ => None,
            })
            .collect()
    }

    /// All reads in issue order, as (address, raw register byte).
    pub fn reads(&self) -> Vec<(u8, u8)> {
        self.operations()
            .iter()
            .filter_map(|op| match op {
                Operation::Read {
                    address, register, ..
                } => Some((*address, *register)),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl BusChannel for MockBus {
    fn open(&mut self, address: u8) -> bool {
        let mut state = self.state.borrow_mut();
        state.operations.push(Operation::Open { address });
        state.present.contains(&address)
    }

    fn write(&mut self, address: u8, register: u8, value: u8) -> bool {
        let mut state = self.state.borrow_mut();
        state.operations.push(Operation::Write {
            address,
            register,
            value,
        });

        if state.fail_next_write {
            state.fail_next_write = false;
            return false;
        }
        if state.fail_writes_to == Some((address, register)) {
            return false;
        }

        state.registers.insert((address, register), value);
        true
    }

    fn read(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> bool {
        let mut state = self.state.borrow_mut();
        state.operations.push(Operation::Read {
            address,
            register,
            len: buffer.len(),
        });

        if state.fail_next_read {
            state.fail_next_read = false;
            return false;
        }
        let base = register & !AUTO_INCREMENT;
        if state.fail_reads_of == Some((address, base)) {
            return false;
        }

        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = state
                .registers
                .get(&(address, base.wrapping_add(i as u8)))
                .copied()
                .unwrap_or(0);
        }

        true
    }
}
