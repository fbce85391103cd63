use crate::aew_core::stats::WindowStat;

use super::controller::RgbGains;

/// Number of brightest windows averaged by the white-patch-average
/// variant. Keeps a single saturated window from dominating the estimate.
pub(super) const WHITE_PATCH_AVG_WINDOWS: usize = 4;

/// Gray world: assume the scene averages to achromatic gray and pull every
/// channel mean toward the mean luma.
pub(super) fn gray_world(stats: &[WindowStat]) -> RgbGains {
    let n = stats.len() as f64;
    let mut sum_r = 0.0;
    let mut sum_g = 0.0;
    let mut sum_b = 0.0;
    for window in stats {
        sum_r += window.r_avg as f64;
        sum_g += window.g_avg as f64;
        sum_b += window.b_avg as f64;
    }
    let mean_r = sum_r / n;
    let mean_g = sum_g / n;
    let mean_b = sum_b / n;
    let luma_ref = (mean_r + mean_g + mean_b) / 3.0;

    RgbGains {
        r: channel_gain(luma_ref, mean_r),
        g: channel_gain(luma_ref, mean_g),
        b: channel_gain(luma_ref, mean_b),
    }
}

/// White patch: the brightest window(s) are assumed to reflect the
/// illuminant, so the other channels are scaled up to its maximum channel.
/// `top_n == 1` is the classic single-maximum variant.
pub(super) fn white_patch(stats: &[WindowStat], top_n: usize) -> RgbGains {
    let mut order: Vec<usize> = (0..stats.len()).collect();
    order.sort_by_key(|&i| {
        let w = &stats[i];
        std::cmp::Reverse(w.r_avg as u64 + w.g_avg as u64 + w.b_avg as u64)
    });
    let picked = &order[..top_n.min(order.len())];

    let n = picked.len() as f64;
    let mut ref_r = 0.0;
    let mut ref_g = 0.0;
    let mut ref_b = 0.0;
    for &i in picked {
        ref_r += stats[i].r_avg as f64;
        ref_g += stats[i].g_avg as f64;
        ref_b += stats[i].b_avg as f64;
    }
    ref_r /= n;
    ref_g /= n;
    ref_b /= n;

    let white = ref_r.max(ref_g).max(ref_b);
    RgbGains {
        r: channel_gain(white, ref_r),
        g: channel_gain(white, ref_g),
        b: channel_gain(white, ref_b),
    }
}

fn channel_gain(reference: f64, channel: f64) -> f32 {
    if channel <= 0.0 {
        // A fully dark channel carries no color information.
        1.0
    } else {
        (reference / channel) as f32
    }
}
