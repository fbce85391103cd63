use tracing::{debug, trace};

use crate::aew_core::common::error::{AewError, Result};
use crate::aew_core::gain;
use crate::aew_core::hardware::SensorDescriptor;
use crate::aew_core::stats::{StatWindowConfig, WindowStat};

use super::metering;

/// Brightness level the exposure loop converges to.
const TARGET_MID_TONE: f64 = 128.0;

/// Fraction of the measured error corrected per iteration. Applying the
/// full correction at once tends to oscillate around the target.
const EC_DAMPING: f64 = 0.5;

/// Auto exposure algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AeAlgorithm {
    /// Disables auto exposure.
    #[default]
    None,
    /// Electronic centric: adjusts the brightness level to the mid-tone.
    Ec,
}

/// Brightness metering system used by the exposure algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeteringType {
    /// Average only a user-defined frame portion.
    PartialArea,
    /// Average the whole frame with emphasis on a user-defined area.
    RectWeighted,
    /// Average the whole frame without location weighting.
    #[default]
    Average,
    /// Six fixed regions weighted against backlight washout.
    Segment,
}

/// Center point of the rectangle of interest. When `centered` is set the
/// coordinates are ignored and the image center is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoiCenter {
    pub x: u32,
    pub y: u32,
    pub centered: bool,
}

impl RoiCenter {
    pub fn centered() -> Self {
        Self {
            x: 0,
            y: 0,
            centered: true,
        }
    }

    pub fn at(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            centered: false,
        }
    }
}

/// Auto exposure configuration settings.
#[derive(Debug, Clone, Copy)]
pub struct AeConfig {
    pub algorithm: AeAlgorithm,
    pub metering: MeteringType,
    pub roi_center: RoiCenter,
    /// Region-of-interest extent as a percentage of image width and height.
    pub roi_percentage: u8,
    /// Split the correction between exposure time and sensor gain instead
    /// of adjusting exposure time alone.
    pub autogain: bool,
}

impl Default for AeConfig {
    fn default() -> Self {
        Self {
            algorithm: AeAlgorithm::None,
            metering: MeteringType::Average,
            roi_center: RoiCenter::centered(),
            roi_percentage: 40,
            autogain: false,
        }
    }
}

/// Region of interest mapped onto the statistics grid.
///
/// Pixel coordinates keep the exact requested rectangle; window indices
/// are inclusive and cover every window whose center lies inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct WindowRoi {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub col_start: u16,
    pub col_end: u16,
    pub row_start: u16,
    pub row_end: u16,
}

/// State machine adjusting exposure time and gain once per iteration.
pub struct AeController {
    config: AeConfig,
    roi: Option<WindowRoi>,
    /// Floor the autogain path never drops below.
    min_gain: f32,
    last_luma: Option<f64>,
}

impl AeController {
    /// Validates the configuration and resolves the region of interest
    /// against the image and the statistics grid.
    pub fn new(
        config: AeConfig,
        width: usize,
        height: usize,
        stat_config: &StatWindowConfig,
        sensor_min_gain: f32,
    ) -> Result<Self> {
        let needs_roi = matches!(
            config.metering,
            MeteringType::PartialArea | MeteringType::RectWeighted
        );
        let roi = if config.algorithm != AeAlgorithm::None && needs_roi {
            if !(1..=100).contains(&config.roi_percentage) {
                return Err(AewError::RoiPercentageOutOfRange(config.roi_percentage));
            }
            Some(resolve_roi(&config, width, height, stat_config))
        } else {
            None
        };

        Ok(Self {
            config,
            roi,
            min_gain: sensor_min_gain,
            last_luma: None,
        })
    }

    pub fn config(&self) -> &AeConfig {
        &self.config
    }

    /// Luminance measured by the most recent successful iteration.
    pub fn last_luma(&self) -> Option<f64> {
        self.last_luma
    }

    /// Combines the per-window statistics into one brightness estimate
    /// using the configured metering mode.
    pub fn metering(&self, stats: &[WindowStat], config: &StatWindowConfig) -> Result<f64> {
        if stats.is_empty() {
            return Err(AewError::EmptyStatistics);
        }
        match self.config.metering {
            MeteringType::Average => Ok(metering::average(stats)),
            MeteringType::Segment => Ok(metering::segment(stats, config)),
            MeteringType::PartialArea => {
                let roi = self.roi.as_ref().ok_or(AewError::NoRegionOfInterest)?;
                Ok(metering::partial_area(stats, config, roi))
            }
            MeteringType::RectWeighted => {
                let roi = self.roi.as_ref().ok_or(AewError::NoRegionOfInterest)?;
                Ok(metering::rect_weighted(stats, config, roi))
            }
        }
    }

    /// Runs one exposure iteration: meter the frame, derive the correction
    /// toward the mid-tone and push it to the sensor. Without autogain the
    /// exposure time absorbs the whole correction; with autogain whatever
    /// the exposure bound cuts off is carried by the sensor gain.
    pub fn run(
        &mut self,
        stats: &[WindowStat],
        stat_config: &StatWindowConfig,
        sensor: &mut SensorDescriptor,
    ) -> Result<()> {
        if self.config.algorithm == AeAlgorithm::None {
            return Ok(());
        }
        let luma = self.metering(stats, stat_config)?.max(1.0);
        let correction = 1.0 + EC_DAMPING * (TARGET_MID_TONE / luma - 1.0);
        trace!("Metered luma {:.1}, correction factor {:.3}", luma, correction);

        let current_exp = sensor.ops.get_exposure()? as f64;
        let desired_exp = current_exp * correction;
        let clamped_exp =
            desired_exp.clamp(sensor.min_exp_time as f64, sensor.max_exp_time as f64);
        sensor.ops.set_exposure(clamped_exp.round() as u32)?;

        if self.config.autogain {
            // Whatever the exposure clamp swallowed has to come from gain.
            let residual = desired_exp / clamped_exp;
            if (residual - 1.0).abs() > 1e-3 {
                self.apply_gain_residual(residual, sensor)?;
            }
        }

        debug!(
            "Exposure adjusted: luma={:.1} exp={}us -> {}us",
            luma,
            current_exp as u32,
            clamped_exp.round() as u32
        );
        self.last_luma = Some(luma);
        Ok(())
    }

    fn apply_gain_residual(&self, residual: f64, sensor: &mut SensorDescriptor) -> Result<()> {
        let floor = self.min_gain.max(sensor.min_gain);
        let (q10_r, q10_g, q10_b) = sensor.ops.get_gain()?;
        let current = gain::from_q10(q10_g).max(floor);

        let target = ((current as f64 * residual) as f32).clamp(floor, sensor.max_gain);
        let snapped = sensor
            .gain_table
            .snap(target)
            .clamp(floor, sensor.max_gain);
        let ratio = snapped / current;
        if (ratio - 1.0).abs() < f32::EPSILON {
            return Ok(());
        }

        // Exposure gain is achromatic: scale all channels equally so the
        // white balance correction is preserved.
        sensor.ops.set_gain(
            gain::to_q10(gain::from_q10(q10_r) * ratio),
            gain::to_q10(gain::from_q10(q10_g) * ratio),
            gain::to_q10(gain::from_q10(q10_b) * ratio),
        )?;
        debug!("Exposure gain adjusted: {:.3} -> {:.3}", current, snapped);
        Ok(())
    }

    /// Pixel coordinates of the metering rectangle, or an error when the
    /// active metering mode has no rectangular region of interest.
    pub fn rectangle_coordinates(&self) -> Result<(u32, u32, u32, u32)> {
        let roi = self.roi.as_ref().ok_or(AewError::NoRegionOfInterest)?;
        Ok((roi.left, roi.top, roi.right, roi.bottom))
    }
}

/// Maps the configured region of interest onto pixels and windows.
///
/// A window belongs to the region iff its center point lies inside the
/// rectangle; the window containing the rectangle center is always
/// included so the region is never empty.
fn resolve_roi(
    config: &AeConfig,
    width: usize,
    height: usize,
    stat_config: &StatWindowConfig,
) -> WindowRoi {
    let (center_x, center_y) = if config.roi_center.centered {
        (width / 2, height / 2)
    } else {
        (
            (config.roi_center.x as usize).min(width.saturating_sub(1)),
            (config.roi_center.y as usize).min(height.saturating_sub(1)),
        )
    };

    let roi_w = (width * config.roi_percentage as usize / 100).max(1);
    let roi_h = (height * config.roi_percentage as usize / 100).max(1);

    let left = center_x.saturating_sub(roi_w / 2).min(width - roi_w);
    let top = center_y.saturating_sub(roi_h / 2).min(height - roi_h);
    let right = left + roi_w;
    let bottom = top + roi_h;

    let win_w = stat_config.win_width as usize;
    let win_h = stat_config.win_height as usize;
    let (col_start, col_end) = axis_windows(left, right, win_w, stat_config.h_count, center_x);
    let (row_start, row_end) = axis_windows(top, bottom, win_h, stat_config.v_count, center_y);

    WindowRoi {
        left: left as u32,
        top: top as u32,
        right: right as u32,
        bottom: bottom as u32,
        col_start,
        col_end,
        row_start,
        row_end,
    }
}

fn axis_windows(start: usize, end: usize, win_pxl: usize, count: u16, center: usize) -> (u16, u16) {
    let last = count.saturating_sub(1);
    let mut first_idx = None;
    let mut last_idx = None;
    for idx in 0..count {
        let win_center = idx as usize * win_pxl + win_pxl / 2;
        if win_center >= start && win_center < end {
            if first_idx.is_none() {
                first_idx = Some(idx);
            }
            last_idx = Some(idx);
        }
    }
    match (first_idx, last_idx) {
        (Some(first), Some(end_idx)) => (first, end_idx),
        // No window center falls inside a very small rectangle; snap to
        // the window holding the rectangle center.
        _ => {
            let idx = ((center / win_pxl.max(1)) as u16).min(last);
            (idx, idx)
        }
    }
}
