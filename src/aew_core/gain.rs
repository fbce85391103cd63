//! Gain step tables and fixed-point gain encoding
//!
//! Sensors usually support gain only in coarse increments that change with
//! the gain range (e.g. the mt9p031 steps by 0.125 from 1-4, by 0.25 from
//! 4.25-8 and by 1 above that). [`GainTable`] captures those ranges and
//! snaps a requested gain onto the grid the hardware can actually apply,
//! which also smooths control-loop convergence since corrections never jump
//! to an arbitrary target value.

use crate::aew_core::common::error::{AewError, Result};

/// Gain step for one range, relative to the previous range end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainStep {
    /// End of the gain range this step applies to
    pub range_end: f32,
    /// Numerator of the gain step
    pub step_n: i32,
    /// Denominator of the gain step
    pub step_d: i32,
}

/// Ordered sequence of gain steps covering the sensor's gain ranges.
///
/// An empty table means the device accepts arbitrary gain values and
/// snapping is the identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GainTable {
    steps: Vec<GainStep>,
}

impl GainTable {
    /// Validates that `range_end` is strictly increasing and that no step
    /// has a zero numerator or denominator.
    pub fn new(steps: Vec<GainStep>) -> Result<Self> {
        let mut prev_end = f32::NEG_INFINITY;
        for step in &steps {
            if step.step_d == 0 || step.step_n == 0 {
                return Err(AewError::InvalidDescriptor(format!(
                    "gain step for range ending at {} has a zero ratio term",
                    step.range_end
                )));
            }
            if step.range_end <= prev_end {
                return Err(AewError::InvalidDescriptor(
                    "gain step ranges must be strictly increasing".to_string(),
                ));
            }
            prev_end = step.range_end;
        }
        Ok(Self { steps })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[GainStep] {
        &self.steps
    }

    /// Snaps `gain` onto the step grid of its range.
    ///
    /// The step used is the one with the smallest `range_end >= gain`
    /// (the last step when the gain exceeds every range). Values already
    /// on the grid are returned unchanged.
    pub fn snap(&self, gain: f32) -> f32 {
        let step = match self
            .steps
            .iter()
            .find(|s| s.range_end >= gain)
            .or_else(|| self.steps.last())
        {
            Some(step) => step,
            None => return gain,
        };
        let ratio = step.step_n as f32 / step.step_d as f32;
        (gain / ratio).round() * ratio
    }
}

/// Encodes a floating-point gain as unsigned 32-bit Q22:10 fixed point.
pub fn to_q10(gain: f32) -> u32 {
    let scaled = (gain as f64 * 1024.0).round();
    scaled.clamp(0.0, u32::MAX as f64) as u32
}

/// Decodes a Q22:10 fixed-point gain back to floating point.
pub fn from_q10(q10_gain: u32) -> f32 {
    q10_gain as f32 / 1024.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // mt9p031-style table
    fn sample_table() -> GainTable {
        GainTable::new(vec![
            GainStep { range_end: 4.0, step_n: 1, step_d: 8 },
            GainStep { range_end: 8.0, step_n: 1, step_d: 4 },
            GainStep { range_end: 128.0, step_n: 1, step_d: 1 },
        ])
        .unwrap()
    }

    #[test]
    fn snap_quantizes_to_range_step() {
        let table = sample_table();
        assert!((table.snap(2.06) - 2.0).abs() < 1e-6);
        assert!((table.snap(5.1) - 5.0).abs() < 1e-6);
        assert!((table.snap(17.4) - 17.0).abs() < 1e-6);
    }

    #[test]
    fn snap_is_idempotent_on_grid_values() {
        let table = sample_table();
        for gain in [1.0, 2.125, 4.0, 6.25, 8.0, 42.0] {
            let snapped = table.snap(gain);
            assert_eq!(snapped, gain);
            assert_eq!(table.snap(snapped), snapped);
        }
    }

    #[test]
    fn snap_beyond_last_range_uses_last_step() {
        let table = sample_table();
        assert!((table.snap(200.3) - 200.0).abs() < 1e-6);
    }

    #[test]
    fn empty_table_is_identity() {
        let table = GainTable::default();
        assert_eq!(table.snap(3.1415), 3.1415);
    }

    #[test]
    fn unordered_ranges_rejected() {
        let result = GainTable::new(vec![
            GainStep { range_end: 8.0, step_n: 1, step_d: 4 },
            GainStep { range_end: 4.0, step_n: 1, step_d: 8 },
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_denominator_rejected() {
        let result = GainTable::new(vec![GainStep { range_end: 4.0, step_n: 1, step_d: 0 }]);
        assert!(result.is_err());
    }

    #[test]
    fn q10_round_trip_within_one_lsb() {
        for gain in [0.0, 1.0, 1.5, 2.125, 7.999, 100.25] {
            let decoded = from_q10(to_q10(gain));
            assert!((decoded - gain).abs() <= 1.0 / 1024.0, "gain {gain} -> {decoded}");
        }
    }

    #[test]
    fn q10_encoding_matches_known_values() {
        assert_eq!(to_q10(1.0), 1024);
        assert_eq!(to_q10(2.5), 2560);
        assert_eq!(to_q10(0.0), 0);
    }

    #[test]
    fn q10_clamps_to_u32_range() {
        assert_eq!(to_q10(f32::MAX), u32::MAX);
        assert_eq!(to_q10(-1.0), 0);
    }
}
