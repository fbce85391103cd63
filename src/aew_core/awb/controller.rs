use tracing::{debug, trace};

use crate::aew_core::common::error::{AewError, Result};
use crate::aew_core::gain::{self, GainTable};
use crate::aew_core::hardware::{InterfaceDescriptor, SensorDescriptor};
use crate::aew_core::stats::WindowStat;

use super::algorithms;

/// Auto white balance algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AwbAlgorithm {
    /// Disables auto white balance, gains are left untouched.
    #[default]
    None,
    /// Assumes the average reflectance of the scene is achromatic.
    GrayWorld,
    /// Takes the absolute maximum response as the illuminant color.
    WhitePatch,
    /// Like WhitePatch but averages the local maxima instead of trusting
    /// a single window.
    WhitePatchAvg,
}

/// Whether gains are applied on the sensor (before the statistics
/// hardware) or digitally on the ISP (after it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GainType {
    #[default]
    Sensor,
    Digital,
}

/// Auto white balance configuration settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwbConfig {
    pub algorithm: AwbAlgorithm,
    pub gain_type: GainType,
}

/// RGB gain correction, floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbGains {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// State machine running the configured white-balance algorithm once per
/// control iteration.
pub struct AwbController {
    config: AwbConfig,
    last_gains: Option<RgbGains>,
}

impl AwbController {
    pub fn new(config: AwbConfig) -> Result<Self> {
        Ok(Self {
            config,
            last_gains: None,
        })
    }

    pub fn config(&self) -> &AwbConfig {
        &self.config
    }

    /// Gains applied by the most recent successful iteration.
    pub fn last_gains(&self) -> Option<RgbGains> {
        self.last_gains
    }

    /// Runs one white-balance iteration over a fresh statistics sequence
    /// and applies the correction through the configured gain path. On any
    /// error the hardware gains and the accumulator are left untouched.
    pub fn run(
        &mut self,
        stats: &[WindowStat],
        sensor: &mut SensorDescriptor,
        interface: &mut InterfaceDescriptor,
    ) -> Result<()> {
        let raw = match self.config.algorithm {
            AwbAlgorithm::None => return Ok(()),
            AwbAlgorithm::GrayWorld => {
                require_stats(stats)?;
                algorithms::gray_world(stats)
            }
            AwbAlgorithm::WhitePatch => {
                require_stats(stats)?;
                algorithms::white_patch(stats, 1)
            }
            AwbAlgorithm::WhitePatchAvg => {
                require_stats(stats)?;
                algorithms::white_patch(stats, algorithms::WHITE_PATCH_AVG_WINDOWS)
            }
        };
        trace!("Raw white balance gains: {:?}", raw);

        let (min_gain, max_gain, table): (f32, f32, &GainTable) = match self.config.gain_type {
            GainType::Sensor => (sensor.min_gain, sensor.max_gain, &sensor.gain_table),
            GainType::Digital => (interface.min_gain, interface.max_gain, &interface.gain_table),
        };
        let gains = RgbGains {
            r: snap_clamped(table, raw.r, min_gain, max_gain),
            g: snap_clamped(table, raw.g, min_gain, max_gain),
            b: snap_clamped(table, raw.b, min_gain, max_gain),
        };

        let q10_r = gain::to_q10(gains.r);
        let q10_g = gain::to_q10(gains.g);
        let q10_b = gain::to_q10(gains.b);
        match self.config.gain_type {
            GainType::Sensor => sensor.ops.set_gain(q10_r, q10_g, q10_b)?,
            GainType::Digital => interface.ops.set_gain(q10_r, q10_g, q10_b)?,
        }

        debug!(
            "White balance gains applied ({:?}): r={:.3} g={:.3} b={:.3}",
            self.config.gain_type, gains.r, gains.g, gains.b
        );
        self.last_gains = Some(gains);
        Ok(())
    }
}

fn require_stats(stats: &[WindowStat]) -> Result<()> {
    if stats.is_empty() {
        Err(AewError::EmptyStatistics)
    } else {
        Ok(())
    }
}

fn snap_clamped(table: &GainTable, gain: f32, min_gain: f32, max_gain: f32) -> f32 {
    table.snap(gain.clamp(min_gain, max_gain)).clamp(min_gain, max_gain)
}
