use crate::aew_core::bayer::ColorPattern;
use crate::aew_core::common::error::{AewError, Result};
use crate::aew_core::gain::GainTable;
use crate::aew_core::stats::{StatWindowConfig, WindowStat};

/// ISP / statistics hardware capability set.
///
/// `read_stat_data` must return one [`WindowStat`] per configured window,
/// ordered row-major from the top-left window to the bottom-right one.
/// Every successful `read_stat_data` must be paired with exactly one
/// `release_stat_data` before the next read.
pub trait IspOps {
    /// Digital (post-statistics) RGB gains, Q22:10 fixed point.
    fn set_gain(&mut self, q10_r: u32, q10_g: u32, q10_b: u32) -> Result<()>;
    fn get_gain(&mut self) -> Result<(u32, u32, u32)>;
    fn set_stat_parameters(
        &mut self,
        width: usize,
        height: usize,
        config: &StatWindowConfig,
    ) -> Result<()>;
    fn read_stat_data(
        &mut self,
        config: &StatWindowConfig,
        pattern: ColorPattern,
    ) -> Result<Vec<WindowStat>>;
    fn release_stat_data(&mut self, config: &StatWindowConfig) -> Result<()>;
}

/// Statistics window limits imposed by the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLimits {
    /// Maximum number of vertical windows
    pub max_v_window: u16,
    /// Maximum number of horizontal windows
    pub max_h_window: u16,
    /// Minimum window height in pixels
    pub min_pxl_v_window: u16,
    /// Maximum window height in pixels
    pub max_pxl_v_window: u16,
    /// Minimum window width in pixels
    pub min_pxl_h_window: u16,
    /// Maximum window width in pixels
    pub max_pxl_h_window: u16,
}

/// Video processing subsystem description: statistics window limits,
/// digital gain ranges and the operations used to drive the ISP.
pub struct InterfaceDescriptor {
    pub limits: WindowLimits,
    /// Minimum digital gain (floating point, not fixed point)
    pub min_gain: f32,
    /// Maximum digital gain (floating point, not fixed point)
    pub max_gain: f32,
    /// Supported digital gain increments per range
    pub gain_table: GainTable,
    pub ops: Box<dyn IspOps>,
}

impl InterfaceDescriptor {
    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;
        if limits.max_v_window == 0 || limits.max_h_window == 0 {
            return Err(AewError::InvalidDescriptor(
                "interface must allow at least one statistics window per axis".to_string(),
            ));
        }
        if limits.min_pxl_v_window == 0
            || limits.min_pxl_h_window == 0
            || limits.min_pxl_v_window > limits.max_pxl_v_window
            || limits.min_pxl_h_window > limits.max_pxl_h_window
        {
            return Err(AewError::InvalidDescriptor(format!(
                "interface window pixel bounds are inconsistent: \
                 vertical [{}, {}], horizontal [{}, {}]",
                limits.min_pxl_v_window,
                limits.max_pxl_v_window,
                limits.min_pxl_h_window,
                limits.max_pxl_h_window
            )));
        }
        if !(self.min_gain < self.max_gain) || self.min_gain <= 0.0 {
            return Err(AewError::InvalidDescriptor(format!(
                "interface gain bounds must satisfy 0 < min < max, got [{}, {}]",
                self.min_gain, self.max_gain
            )));
        }
        Ok(())
    }
}
