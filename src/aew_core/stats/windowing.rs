use tracing::debug;

use crate::aew_core::common::error::{AewError, Result};
use crate::aew_core::hardware::WindowLimits;
use crate::aew_core::stats::types::StatWindowConfig;

/// Computes the statistics window grid for an image.
///
/// The maximum achievable window count per axis is bounded by the hardware
/// window limit and by how many minimum-size windows fit in the image. The
/// segmentation factor (10-100) selects that percentage of the maximum,
/// never going below one window. Window extents are the image size divided
/// by the count; when a window would exceed the hardware maximum the count
/// is raised until it fits.
pub fn configure(
    width: usize,
    height: usize,
    segmentation_factor: u8,
    limits: &WindowLimits,
) -> Result<StatWindowConfig> {
    if width == 0 || height == 0 {
        return Err(AewError::InvalidDimensions(width, height));
    }
    if !(10..=100).contains(&segmentation_factor) {
        return Err(AewError::SegmentationOutOfRange(segmentation_factor));
    }
    if width < limits.min_pxl_h_window as usize || height < limits.min_pxl_v_window as usize {
        return Err(AewError::WindowGeometry(format!(
            "image {}x{} cannot fit a minimum {}x{} statistics window",
            width, height, limits.min_pxl_h_window, limits.min_pxl_v_window
        )));
    }

    let (h_count, win_width) = axis_layout(
        width,
        segmentation_factor,
        limits.max_h_window,
        limits.min_pxl_h_window,
        limits.max_pxl_h_window,
        "horizontal",
    )?;
    let (v_count, win_height) = axis_layout(
        height,
        segmentation_factor,
        limits.max_v_window,
        limits.min_pxl_v_window,
        limits.max_pxl_v_window,
        "vertical",
    )?;

    let config = StatWindowConfig {
        v_count,
        h_count,
        win_width,
        win_height,
    };
    debug!(
        "Statistics grid for {}x{} at {}%: {}x{} windows of {}x{} px",
        width, height, segmentation_factor, h_count, v_count, win_width, win_height
    );
    Ok(config)
}

fn axis_layout(
    extent: usize,
    segmentation_factor: u8,
    max_windows: u16,
    min_pxl: u16,
    max_pxl: u16,
    axis: &str,
) -> Result<(u16, u16)> {
    let max_count = (extent / min_pxl as usize).min(max_windows as usize).max(1);
    let count = (max_count * segmentation_factor as usize / 100).max(1);

    // Too few windows would push the window extent past the hardware
    // maximum. Taking the max against the fixed floor keeps the count
    // monotonic in the segmentation factor.
    let count = count.max(extent.div_ceil(max_pxl as usize));
    if count > max_windows as usize {
        return Err(AewError::WindowGeometry(format!(
            "{} extent {} needs more than {} windows of at most {} px",
            axis, extent, max_windows, max_pxl
        )));
    }

    let win_pxl = (extent / count).min(max_pxl as usize);
    if win_pxl < min_pxl as usize {
        return Err(AewError::WindowGeometry(format!(
            "{} window of {} px is below the hardware minimum of {} px",
            axis, win_pxl, min_pxl
        )));
    }
    Ok((count as u16, win_pxl as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    // dm365-style H3A limits
    fn limits() -> WindowLimits {
        WindowLimits {
            max_v_window: 128,
            max_h_window: 36,
            min_pxl_v_window: 2,
            max_pxl_v_window: 256,
            min_pxl_h_window: 8,
            max_pxl_h_window: 256,
        }
    }

    #[test]
    fn counts_respect_hardware_bounds() {
        for sf in [10, 25, 50, 75, 100] {
            let config = configure(1280, 720, sf, &limits()).unwrap();
            assert!(config.h_count >= 1 && config.h_count <= 36);
            assert!(config.v_count >= 1 && config.v_count <= 128);
            assert!(config.win_width >= 8 && config.win_width <= 256);
            assert!(config.win_height >= 2 && config.win_height <= 256);
        }
    }

    #[test]
    fn window_count_monotonic_in_segmentation_factor() {
        let mut prev = 0usize;
        for sf in 10..=100 {
            let config = configure(1920, 1080, sf, &limits()).unwrap();
            let count = config.window_count();
            assert!(count >= prev, "count dropped from {prev} to {count} at {sf}%");
            prev = count;
        }
    }

    #[test]
    fn window_count_monotonic_with_tight_window_limits() {
        // A small maximum window extent forces the count floor to kick in
        // for low segmentation factors; counts that narrowly clear the
        // floor at higher factors must never dip below it.
        let tight = WindowLimits {
            max_v_window: 36,
            max_h_window: 36,
            min_pxl_v_window: 8,
            max_pxl_v_window: 33,
            min_pxl_h_window: 8,
            max_pxl_h_window: 33,
        };
        let mut prev = 0usize;
        for sf in 10..=100 {
            let config = configure(100, 100, sf, &tight).unwrap();
            let count = config.window_count();
            assert!(count >= prev, "count dropped from {prev} to {count} at {sf}%");
            assert!(config.win_width <= 33 && config.win_width >= 8);
            assert!(config.win_height <= 33 && config.win_height >= 8);
            prev = count;
        }
    }

    #[test]
    fn oversized_windows_raise_count() {
        // At 10% a 4096-wide image would want 3 windows of 1365 px; the
        // layout must raise the count so windows stay within 256 px.
        let config = configure(4096, 64, 10, &limits()).unwrap();
        assert!(config.win_width <= 256);
        assert!(config.h_count as usize * config.win_width as usize <= 4096);
    }

    #[test]
    fn image_too_small_for_minimum_window() {
        let result = configure(4, 4, 50, &limits());
        assert!(matches!(result, Err(AewError::WindowGeometry(_))));
    }

    #[test]
    fn image_too_wide_for_window_budget() {
        let mut narrow = limits();
        narrow.max_h_window = 4;
        narrow.max_pxl_h_window = 16;
        let result = configure(1280, 720, 50, &narrow);
        assert!(matches!(result, Err(AewError::WindowGeometry(_))));
    }

    #[test]
    fn segmentation_factor_range_enforced() {
        assert!(matches!(
            configure(640, 480, 9, &limits()),
            Err(AewError::SegmentationOutOfRange(9))
        ));
        assert!(matches!(
            configure(640, 480, 101, &limits()),
            Err(AewError::SegmentationOutOfRange(101))
        ));
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            configure(0, 480, 50, &limits()),
            Err(AewError::InvalidDimensions(0, 480))
        ));
    }
}
