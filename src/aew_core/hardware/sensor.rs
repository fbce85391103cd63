use crate::aew_core::bayer::ColorPattern;
use crate::aew_core::common::error::{AewError, Result};
use crate::aew_core::gain::GainTable;

/// Camera sensor capability set.
///
/// Gains are fixed-point Q22:10 unsigned values, exposure times are in
/// microseconds. Implementations capture whatever device state they need
/// (this replaces the opaque target pointer of C-style callback tables).
pub trait SensorOps {
    fn set_gain(&mut self, q10_r: u32, q10_g: u32, q10_b: u32) -> Result<()>;
    fn get_gain(&mut self) -> Result<(u32, u32, u32)>;
    fn set_exposure(&mut self, exp_time_us: u32) -> Result<()>;
    fn get_exposure(&mut self) -> Result<u32>;
}

/// Sensor characteristics: Bayer ordering, exposure and gain ranges, the
/// gain step table and the operations used to drive the device.
pub struct SensorDescriptor {
    /// Bayer pattern order the sensor sends to the statistics hardware
    pub pattern: ColorPattern,
    /// Minimum exposure time in the units used by `set_exposure`
    pub min_exp_time: u32,
    /// Maximum exposure time in the units used by `set_exposure`
    pub max_exp_time: u32,
    /// Minimum analog gain (floating point, not fixed point)
    pub min_gain: f32,
    /// Maximum analog gain (floating point, not fixed point)
    pub max_gain: f32,
    /// Supported gain increments per range
    pub gain_table: GainTable,
    pub ops: Box<dyn SensorOps>,
}

impl SensorDescriptor {
    pub fn validate(&self) -> Result<()> {
        self.pattern.validate()?;
        if self.min_exp_time >= self.max_exp_time {
            return Err(AewError::InvalidDescriptor(format!(
                "sensor exposure bounds must satisfy min < max, got [{}, {}]",
                self.min_exp_time, self.max_exp_time
            )));
        }
        if !(self.min_gain < self.max_gain) || self.min_gain <= 0.0 {
            return Err(AewError::InvalidDescriptor(format!(
                "sensor gain bounds must satisfy 0 < min < max, got [{}, {}]",
                self.min_gain, self.max_gain
            )));
        }
        Ok(())
    }
}
