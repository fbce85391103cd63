//! Statistics window data types

/// Per-window statistical data: average, maximum and minimum of each
/// channel component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStat {
    pub r_avg: u32,
    pub g_avg: u32,
    pub b_avg: u32,
    pub r_max: u32,
    pub g_max: u32,
    pub b_max: u32,
    pub r_min: u32,
    pub g_min: u32,
    pub b_min: u32,
}

impl WindowStat {
    /// Uniform gray window, handy for synthetic grids.
    pub fn gray(level: u32) -> Self {
        Self {
            r_avg: level,
            g_avg: level,
            b_avg: level,
            r_max: level,
            g_max: level,
            b_max: level,
            r_min: level,
            g_min: level,
            b_min: level,
        }
    }
}

/// Statistics hardware window grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatWindowConfig {
    /// Number of windows in the vertical direction
    pub v_count: u16,
    /// Number of windows in the horizontal direction
    pub h_count: u16,
    /// Width of each window in pixels
    pub win_width: u16,
    /// Height of each window in pixels
    pub win_height: u16,
}

impl StatWindowConfig {
    pub fn window_count(&self) -> usize {
        self.v_count as usize * self.h_count as usize
    }
}
