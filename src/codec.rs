//! Register codec: configuration codes to control bytes and scale factors
//!
//! Pure mappings with no bus access. Every function validates its codes
//! against the legal enumerated set and fails with
//! [`DeviceError::InvalidConfig`] on anything outside it; codes are never
//! clamped. Each control byte comes paired with the physical scale factor
//! the selected full-scale range implies, so raw counts can be converted
//! without re-deriving the configuration later.

use crate::error::{DeviceError, Result};
use crate::registers::*;

/// Nominal output data rates selectable on the gyro (and with it, the
/// accel/gyro die as a whole), indexed by sample-rate code.
pub const GYRO_SAMPLE_RATES_HZ: [u32; 6] = [15, 60, 119, 238, 476, 952];

/// Encoded gyro control: CTRL_REG1_G byte plus derived rate and scale.
#[derive(Debug, Clone, Copy)]
pub struct GyroCtrl {
    /// Value for CTRL_REG1_G
    pub byte: u8,
    /// Nominal output data rate selected by the sample-rate code
    pub sample_rate_hz: u32,
    /// Radians/second per LSB at the selected full scale
    pub scale_rad_s: f32,
}

/// Encoded accel control: CTRL_REG6_XL byte plus derived scale.
#[derive(Debug, Clone, Copy)]
pub struct AccelCtrl {
    /// Value for CTRL_REG6_XL
    pub byte: u8,
    /// g per LSB at the selected full scale
    pub scale_g: f32,
}

/// Encoded mag control: rate and scale register bytes plus derived scale.
#[derive(Debug, Clone, Copy)]
pub struct MagCtrl {
    /// Value for CTRL_REG1_M
    pub rate_byte: u8,
    /// Value for CTRL_REG2_M
    pub scale_byte: u8,
    /// Microtesla per LSB at the selected full scale
    pub scale_ut: f32,
}

/// Encode gyro sample rate, bandwidth, and full scale into CTRL_REG1_G.
///
/// Legal codes: sample rate 0..=5, bandwidth 0..=3, full scale 0..=2.
/// Full-scale code 2 maps to the 0b11 register pattern; 0b10 is reserved
/// on this part.
pub fn encode_gyro_ctrl(rate_code: u8, bandwidth_code: u8, scale_code: u8) -> Result<GyroCtrl> {
    let sample_rate_hz = *GYRO_SAMPLE_RATES_HZ
        .get(rate_code as usize)
        .ok_or(DeviceError::InvalidConfig {
            setting: "gyro sample rate",
            code: rate_code,
        })?;

    if bandwidth_code > 3 {
        return Err(DeviceError::InvalidConfig {
            setting: "gyro bandwidth",
            code: bandwidth_code,
        });
    }

    let (fs_bits, scale_dps) = match scale_code {
        0 => (0b00, GYRO_SCALE_245DPS),
        1 => (0b01, GYRO_SCALE_500DPS),
        2 => (0b11, GYRO_SCALE_2000DPS),
        _ => {
            return Err(DeviceError::InvalidConfig {
                setting: "gyro full scale",
                code: scale_code,
            })
        }
    };

    Ok(GyroCtrl {
        byte: ((rate_code + 1) << 5) | (fs_bits << 3) | bandwidth_code,
        sample_rate_hz,
        scale_rad_s: scale_dps * DEG_TO_RAD,
    })
}

/// Encode accel sample rate, anti-alias bandwidth, and full scale into
/// CTRL_REG6_XL.
///
/// Legal codes: sample rate 0..=6 (0 powers the accelerometer down),
/// low pass 0..=3, full scale 0..=3. The BW_SCAL_ODR bit is always set so
/// the low-pass code selects the filter; otherwise the part ties bandwidth
/// to the data rate and the code would have no effect. Full-scale codes
/// follow the part's register encoding, which orders the ranges
/// {±2g, ±16g, ±4g, ±8g}.
pub fn encode_accel_ctrl(rate_code: u8, low_pass_code: u8, scale_code: u8) -> Result<AccelCtrl> {
    if rate_code > 6 {
        return Err(DeviceError::InvalidConfig {
            setting: "accel sample rate",
            code: rate_code,
        });
    }

    if low_pass_code > 3 {
        return Err(DeviceError::InvalidConfig {
            setting: "accel low pass",
            code: low_pass_code,
        });
    }

    let scale_g = match scale_code {
        0 => ACCEL_SCALE_2G,
        1 => ACCEL_SCALE_16G,
        2 => ACCEL_SCALE_4G,
        3 => ACCEL_SCALE_8G,
        _ => {
            return Err(DeviceError::InvalidConfig {
                setting: "accel full scale",
                code: scale_code,
            })
        }
    };

    Ok(AccelCtrl {
        byte: (rate_code << 5) | (scale_code << 3) | CTRL6_XL_BW_SCAL_ODR | low_pass_code,
        scale_g,
    })
}

/// Encode mag sample rate and full scale into CTRL_REG1_M / CTRL_REG2_M.
///
/// Legal codes: sample rate 0..=5 ({0.625 .. 20} Hz), full scale 0..=3
/// ({±4, ±8, ±12, ±16} gauss).
pub fn encode_mag_ctrl(rate_code: u8, scale_code: u8) -> Result<MagCtrl> {
    if rate_code > 5 {
        return Err(DeviceError::InvalidConfig {
            setting: "mag sample rate",
            code: rate_code,
        });
    }

    let scale_ut = match scale_code {
        0 => MAG_SCALE_4GAUSS,
        1 => MAG_SCALE_8GAUSS,
        2 => MAG_SCALE_12GAUSS,
        3 => MAG_SCALE_16GAUSS,
        _ => {
            return Err(DeviceError::InvalidConfig {
                setting: "mag full scale",
                code: scale_code,
            })
        }
    };

    Ok(MagCtrl {
        rate_byte: rate_code << 2,
        scale_byte: scale_code << 5,
        scale_ut,
    })
}

/// Encode the gyro high-pass cutoff selection into CTRL_REG3_G.
///
/// Legal codes 0..=9. The high-pass enable bit is always set in the
/// returned byte.
pub fn encode_high_pass_ctrl(code: u8) -> Result<u8> {
    if code > 9 {
        return Err(DeviceError::InvalidConfig {
            setting: "gyro high pass",
            code,
        });
    }

    Ok(CTRL3_G_HP_EN | code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn gyro_rates_cover_documented_set() {
        let rates: Vec<u32> = (0..6)
            .map(|code| encode_gyro_ctrl(code, 0, 0).unwrap().sample_rate_hz)
            .collect();
        assert_eq!(rates, vec![15, 60, 119, 238, 476, 952]);
    }

    #[test]
    fn gyro_ctrl_byte_layout() {
        // 119 Hz, bandwidth 1, ±245 dps: ODR=0b011, FS=0b00, BW=0b01
        let ctrl = encode_gyro_ctrl(2, 1, 0).unwrap();
        assert_eq!(ctrl.byte, 0b0110_0001);

        // ±2000 dps uses the 0b11 pattern, skipping the reserved 0b10
        let ctrl = encode_gyro_ctrl(0, 0, 2).unwrap();
        assert_eq!(ctrl.byte, 0b0011_1000);
    }

    #[test]
    fn gyro_scales_convert_to_radians() {
        let expected = [
            GYRO_SCALE_245DPS * DEG_TO_RAD,
            GYRO_SCALE_500DPS * DEG_TO_RAD,
            GYRO_SCALE_2000DPS * DEG_TO_RAD,
        ];
        for (code, want) in expected.iter().enumerate() {
            let got = encode_gyro_ctrl(0, 0, code as u8).unwrap().scale_rad_s;
            assert!((got - want).abs() < EPSILON);
        }
    }

    #[test]
    fn gyro_rejects_illegal_codes() {
        assert!(encode_gyro_ctrl(6, 0, 0).is_err());
        assert!(encode_gyro_ctrl(0, 4, 0).is_err());
        assert!(encode_gyro_ctrl(0, 0, 3).is_err());
        assert!(encode_gyro_ctrl(255, 255, 255).is_err());
    }

    #[test]
    fn accel_ctrl_byte_sets_manual_bandwidth() {
        // 119 Hz (code 3), low pass 2, ±4g (code 2)
        let ctrl = encode_accel_ctrl(3, 2, 2).unwrap();
        assert_eq!(ctrl.byte, (3 << 5) | (2 << 3) | 0b100 | 2);
    }

    #[test]
    fn accel_scale_order_matches_register_encoding() {
        let scales: Vec<f32> = (0..4)
            .map(|code| encode_accel_ctrl(0, 0, code).unwrap().scale_g)
            .collect();
        assert!((scales[0] - 0.000_061).abs() < EPSILON); // ±2g
        assert!((scales[1] - 0.000_732).abs() < EPSILON); // ±16g
        assert!((scales[2] - 0.000_122).abs() < EPSILON); // ±4g
        assert!((scales[3] - 0.000_244).abs() < EPSILON); // ±8g
    }

    #[test]
    fn accel_rejects_illegal_codes() {
        assert!(encode_accel_ctrl(7, 0, 0).is_err());
        assert!(encode_accel_ctrl(0, 4, 0).is_err());
        assert!(encode_accel_ctrl(0, 0, 4).is_err());
    }

    #[test]
    fn mag_ctrl_bytes() {
        let ctrl = encode_mag_ctrl(5, 3).unwrap();
        assert_eq!(ctrl.rate_byte, 5 << 2);
        assert_eq!(ctrl.scale_byte, 3 << 5);
        assert!((ctrl.scale_ut - 0.058).abs() < EPSILON);
    }

    #[test]
    fn mag_rejects_illegal_codes() {
        assert!(encode_mag_ctrl(6, 0).is_err());
        assert!(encode_mag_ctrl(0, 4).is_err());
    }

    #[test]
    fn high_pass_always_sets_enable_bit() {
        for code in 0..=9 {
            let byte = encode_high_pass_ctrl(code).unwrap();
            assert_eq!(byte & CTRL3_G_HP_EN, CTRL3_G_HP_EN);
            assert_eq!(byte & 0x0F, code);
        }
        assert!(encode_high_pass_ctrl(10).is_err());
    }

    #[test]
    fn illegal_codes_report_the_offending_value() {
        match encode_gyro_ctrl(9, 0, 0) {
            Err(DeviceError::InvalidConfig { setting, code }) => {
                assert_eq!(setting, "gyro sample rate");
                assert_eq!(code, 9);
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }
}
