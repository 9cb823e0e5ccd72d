//! Conversion of signed codes into physical units

use crate::config::Gain;

/// Positive full-scale code count, `2^23 - 1`
pub const FULL_SCALE_CODES: i32 = 0x7F_FFFF;

/// Full-scale input voltage at unity gain, in volts
pub const REFERENCE_VOLTAGE: f32 = 1.2;

/// Convert a signed conversion result to the input voltage in volts
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn code_to_voltage(code: i32, gain: Gain) -> f32 {
    let full_scale = REFERENCE_VOLTAGE / gain.factor();
    code as f32 / FULL_SCALE_CODES as f32 * full_scale
}

/// Gas measured by an electrochemical sensor attached to a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gas {
    /// Carbon monoxide
    Co,
    /// Nitrogen dioxide
    No2,
    /// Ozone
    O3,
    /// Sulfur dioxide
    So2,
}

/// Linear calibration of a gas sensor's output voltage
///
/// The constants are board specific and supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GasCalibration {
    /// Gas this calibration applies to
    pub gas: Gas,
    /// Sensor output at zero concentration, in volts
    pub zero_offset: f32,
    /// Concentration per volt above the zero offset
    pub sensitivity: f32,
}

impl GasCalibration {
    /// Concentration for a measured voltage
    #[must_use]
    pub fn concentration(&self, voltage: f32) -> f32 {
        (voltage - self.zero_offset) * self.sensitivity
    }
}
