//! LSM9DS1 register definitions and scale constants
//!
//! The LSM9DS1 is a two-die package: the accelerometer/gyroscope unit and
//! the magnetometer unit answer on separate bus sub-addresses, each with its
//! own register file and identity register.

// ============================================================================
// Bus sub-addresses
// ============================================================================

/// Accelerometer/gyroscope sub-device address (SDO_A/G high)
pub const AG_ADDRESS: u8 = 0x6B;

/// Magnetometer sub-device address (SDO_M high)
pub const MAG_ADDRESS: u8 = 0x1E;

/// Accelerometer/gyroscope sub-device address (SDO_A/G low)
pub const AG_ADDRESS_ALT: u8 = 0x6A;

/// Magnetometer sub-device address (SDO_M low)
pub const MAG_ADDRESS_ALT: u8 = 0x1C;

/// Auto-increment bit OR'd into the register address for burst reads.
/// The magnetometer die requires it; the accel/gyro die increments via
/// IF_ADD_INC and ignores the bit.
pub const AUTO_INCREMENT: u8 = 0x80;

// ============================================================================
// Accelerometer/gyroscope registers
// ============================================================================

/// Identity register (same offset on both dies)
pub const WHO_AM_I: u8 = 0x0F;

/// Gyro data rate, full scale, bandwidth
pub const CTRL_REG1_G: u8 = 0x10;

/// Gyro high-pass filter control
pub const CTRL_REG3_G: u8 = 0x12;

/// Data-ready status
pub const STATUS_REG: u8 = 0x17;

/// Gyro output, X axis low byte (six bytes X/Y/Z, little endian)
pub const OUT_X_L_G: u8 = 0x18;

/// Accel data rate, full scale, anti-alias bandwidth
pub const CTRL_REG6_XL: u8 = 0x20;

/// Accel auxiliary filter chain control
pub const CTRL_REG7_XL: u8 = 0x21;

/// Reset / interface control
pub const CTRL_REG8: u8 = 0x22;

/// Accel output, X axis low byte
pub const OUT_X_L_XL: u8 = 0x28;

/// Expected WHO_AM_I response from the accel/gyro die
pub const WHO_AM_I_AG_VALUE: u8 = 0x68;

/// CTRL_REG8: software reset of the accel/gyro die
pub const CTRL8_SW_RESET: u8 = 0x01;

/// CTRL_REG8: auto-increment register address on multi-byte access
pub const CTRL8_IF_ADD_INC: u8 = 0x04;

/// CTRL_REG3_G: high-pass filter enable
pub const CTRL3_G_HP_EN: u8 = 0x40;

/// CTRL_REG6_XL: select bandwidth from BW_XL bits instead of the data rate
pub const CTRL6_XL_BW_SCAL_ODR: u8 = 0x04;

/// STATUS_REG: new accelerometer data available
pub const STATUS_XLDA: u8 = 0x01;

/// STATUS_REG: new gyroscope data available
pub const STATUS_GDA: u8 = 0x02;

// ============================================================================
// Magnetometer registers
// ============================================================================

/// Mag data rate
pub const CTRL_REG1_M: u8 = 0x20;

/// Mag full scale
pub const CTRL_REG2_M: u8 = 0x21;

/// Mag operating mode
pub const CTRL_REG3_M: u8 = 0x22;

/// Mag output, X axis low byte
pub const OUT_X_L_M: u8 = 0x28;

/// Expected WHO_AM_I response from the magnetometer die
pub const WHO_AM_I_M_VALUE: u8 = 0x3D;

/// CTRL_REG3_M: continuous-conversion mode
pub const CTRL3_M_CONTINUOUS: u8 = 0x00;

// ============================================================================
// Scale factors (physical units per LSB)
// ============================================================================

/// Gyro sensitivity at ±245 dps (degrees/second per LSB)
pub const GYRO_SCALE_245DPS: f32 = 0.008_75;

/// Gyro sensitivity at ±500 dps
pub const GYRO_SCALE_500DPS: f32 = 0.017_5;

/// Gyro sensitivity at ±2000 dps
pub const GYRO_SCALE_2000DPS: f32 = 0.07;

/// Accel sensitivity at ±2 g (g per LSB)
pub const ACCEL_SCALE_2G: f32 = 0.000_061;

/// Accel sensitivity at ±16 g
pub const ACCEL_SCALE_16G: f32 = 0.000_732;

/// Accel sensitivity at ±4 g
pub const ACCEL_SCALE_4G: f32 = 0.000_122;

/// Accel sensitivity at ±8 g
pub const ACCEL_SCALE_8G: f32 = 0.000_244;

/// Mag sensitivity at ±4 gauss (µT per LSB)
pub const MAG_SCALE_4GAUSS: f32 = 0.014;

/// Mag sensitivity at ±8 gauss
pub const MAG_SCALE_8GAUSS: f32 = 0.029;

/// Mag sensitivity at ±12 gauss
pub const MAG_SCALE_12GAUSS: f32 = 0.043;

/// Mag sensitivity at ±16 gauss
pub const MAG_SCALE_16GAUSS: f32 = 0.058;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
