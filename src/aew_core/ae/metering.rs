use crate::aew_core::stats::{StatWindowConfig, WindowStat};

use super::controller::WindowRoi;

/// Weight given to region-of-interest windows by rect-weighted metering;
/// everything outside the rectangle weighs 1.
pub(super) const ROI_WEIGHT: f64 = 4.0;

/// Segment metering region weights, 2 rows x 3 columns. The lower center
/// region dominates so a bright sky or backlight cannot wash out the
/// subject, which usually sits low and central in the frame.
pub(super) const SEGMENT_WEIGHTS: [[f64; 3]; 2] = [[1.0, 1.0, 1.0], [2.0, 4.0, 2.0]];

fn window_luma(window: &WindowStat) -> f64 {
    (window.r_avg as f64 + window.g_avg as f64 + window.b_avg as f64) / 3.0
}

/// Uniform average over the whole grid.
pub(super) fn average(stats: &[WindowStat]) -> f64 {
    let sum: f64 = stats.iter().map(window_luma).sum();
    sum / stats.len() as f64
}

/// Average restricted to the region-of-interest windows.
pub(super) fn partial_area(stats: &[WindowStat], config: &StatWindowConfig, roi: &WindowRoi) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in roi.row_start..=roi.row_end {
        for col in roi.col_start..=roi.col_end {
            sum += window_luma(&stats[row as usize * config.h_count as usize + col as usize]);
            count += 1;
        }
    }
    sum / count as f64
}

/// Whole-frame average with extra emphasis on the region of interest.
pub(super) fn rect_weighted(
    stats: &[WindowStat],
    config: &StatWindowConfig,
    roi: &WindowRoi,
) -> f64 {
    let mut sum = 0.0;
    let mut total_weight = 0.0;
    for row in 0..config.v_count {
        for col in 0..config.h_count {
            let inside = row >= roi.row_start
                && row <= roi.row_end
                && col >= roi.col_start
                && col <= roi.col_end;
            let weight = if inside { ROI_WEIGHT } else { 1.0 };
            sum += weight * window_luma(&stats[row as usize * config.h_count as usize + col as usize]);
            total_weight += weight;
        }
    }
    sum / total_weight
}

/// Six-region metering: the frame is split into a fixed 3x2 layout and
/// each region contributes with its own weight.
pub(super) fn segment(stats: &[WindowStat], config: &StatWindowConfig) -> f64 {
    let mut sum = 0.0;
    let mut total_weight = 0.0;
    for row in 0..config.v_count {
        for col in 0..config.h_count {
            let region_row = (row as usize * 2 / config.v_count as usize).min(1);
            let region_col = (col as usize * 3 / config.h_count as usize).min(2);
            let weight = SEGMENT_WEIGHTS[region_row][region_col];
            sum += weight * window_luma(&stats[row as usize * config.h_count as usize + col as usize]);
            total_weight += weight;
        }
    }
    sum / total_weight
}
