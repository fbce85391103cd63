use tracing::{debug, warn};

use crate::aew_core::bayer::ColorPattern;
use crate::aew_core::common::error::{AewError, Result};
use crate::aew_core::hardware::IspOps;
use crate::aew_core::stats::types::{StatWindowConfig, WindowStat};

/// Drives the ISP statistics module through a strict
/// acquire -> use -> release cycle.
///
/// The hardware is configured lazily: `set_stat_parameters` is sent on the
/// first acquire and again only after the grid configuration changes.
/// Statistics are freshly read on every acquire and never cached, the
/// control loop must always decide on the current frame.
pub struct StatEngine {
    width: usize,
    height: usize,
    config: StatWindowConfig,
    parameters_sent: bool,
    held: bool,
}

impl StatEngine {
    pub fn new(width: usize, height: usize, config: StatWindowConfig) -> Self {
        Self {
            width,
            height,
            config,
            parameters_sent: false,
            held: false,
        }
    }

    pub fn config(&self) -> &StatWindowConfig {
        &self.config
    }

    /// Replaces the window grid; the next acquire reconfigures the hardware.
    pub fn reconfigure(&mut self, width: usize, height: usize, config: StatWindowConfig) {
        self.width = width;
        self.height = height;
        self.config = config;
        self.parameters_sent = false;
    }

    /// Reads one fresh statistics sequence, row-major top-left to
    /// bottom-right. Must be balanced by [`StatEngine::release`] before the
    /// next acquire.
    pub fn acquire(
        &mut self,
        isp: &mut dyn IspOps,
        pattern: ColorPattern,
    ) -> Result<Vec<WindowStat>> {
        if self.held {
            return Err(AewError::Acquisition(
                "statistics already held, release the previous sequence first".to_string(),
            ));
        }
        if !self.parameters_sent {
            debug!(
                "Configuring statistics hardware: {}x{} windows",
                self.config.h_count, self.config.v_count
            );
            isp.set_stat_parameters(self.width, self.height, &self.config)?;
            self.parameters_sent = true;
        }

        let stats = isp.read_stat_data(&self.config, pattern)?;
        if stats.len() != self.config.window_count() {
            // Leave the hardware buffer in a releasable state before bailing.
            if let Err(e) = isp.release_stat_data(&self.config) {
                warn!("Failed to release short statistics buffer: {}", e);
            }
            return Err(AewError::Acquisition(format!(
                "expected {} windows, hardware returned {}",
                self.config.window_count(),
                stats.len()
            )));
        }
        self.held = true;
        Ok(stats)
    }

    /// Releases the statistics buffer acquired by the last
    /// [`StatEngine::acquire`]. Consumes the sequence: stale window data
    /// must not survive into the next iteration.
    pub fn release(&mut self, isp: &mut dyn IspOps, stats: Vec<WindowStat>) -> Result<()> {
        if !self.held {
            return Err(AewError::Acquisition(
                "no statistics sequence is currently held".to_string(),
            ));
        }
        drop(stats);
        self.held = false;
        isp.release_stat_data(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aew_core::bayer;

    struct CountingIsp {
        configured: usize,
        reads: usize,
        releases: usize,
        short_read: bool,
    }

    impl CountingIsp {
        fn new() -> Self {
            Self {
                configured: 0,
                reads: 0,
                releases: 0,
                short_read: false,
            }
        }
    }

    impl IspOps for CountingIsp {
        fn set_gain(&mut self, _r: u32, _g: u32, _b: u32) -> Result<()> {
            Ok(())
        }

        fn get_gain(&mut self) -> Result<(u32, u32, u32)> {
            Ok((1024, 1024, 1024))
        }

        fn set_stat_parameters(
            &mut self,
            _width: usize,
            _height: usize,
            _config: &StatWindowConfig,
        ) -> Result<()> {
            self.configured += 1;
            Ok(())
        }

        fn read_stat_data(
            &mut self,
            config: &StatWindowConfig,
            _pattern: ColorPattern,
        ) -> Result<Vec<WindowStat>> {
            self.reads += 1;
            let count = if self.short_read {
                config.window_count() - 1
            } else {
                config.window_count()
            };
            Ok(vec![WindowStat::gray(128); count])
        }

        fn release_stat_data(&mut self, _config: &StatWindowConfig) -> Result<()> {
            self.releases += 1;
            Ok(())
        }
    }

    fn grid() -> StatWindowConfig {
        StatWindowConfig {
            v_count: 4,
            h_count: 6,
            win_width: 100,
            win_height: 100,
        }
    }

    #[test]
    fn parameters_sent_once_per_configuration() {
        let mut isp = CountingIsp::new();
        let mut engine = StatEngine::new(600, 400, grid());

        for _ in 0..3 {
            let stats = engine.acquire(&mut isp, bayer::RGGB).unwrap();
            engine.release(&mut isp, stats).unwrap();
        }
        assert_eq!(isp.configured, 1);
        assert_eq!(isp.reads, 3);
        assert_eq!(isp.releases, 3);

        engine.reconfigure(600, 400, grid());
        let stats = engine.acquire(&mut isp, bayer::RGGB).unwrap();
        engine.release(&mut isp, stats).unwrap();
        assert_eq!(isp.configured, 2);
    }

    #[test]
    fn double_acquire_rejected() {
        let mut isp = CountingIsp::new();
        let mut engine = StatEngine::new(600, 400, grid());

        let stats = engine.acquire(&mut isp, bayer::RGGB).unwrap();
        assert!(matches!(
            engine.acquire(&mut isp, bayer::RGGB),
            Err(AewError::Acquisition(_))
        ));
        engine.release(&mut isp, stats).unwrap();
    }

    #[test]
    fn release_without_acquire_rejected() {
        let mut isp = CountingIsp::new();
        let mut engine = StatEngine::new(600, 400, grid());
        assert!(engine.release(&mut isp, Vec::new()).is_err());
    }

    #[test]
    fn short_read_is_released_and_reported() {
        let mut isp = CountingIsp::new();
        isp.short_read = true;
        let mut engine = StatEngine::new(600, 400, grid());

        let result = engine.acquire(&mut isp, bayer::RGGB);
        assert!(matches!(result, Err(AewError::Acquisition(_))));
        assert_eq!(isp.releases, 1);

        // Engine stays usable for the next frame.
        isp.short_read = false;
        let stats = engine.acquire(&mut isp, bayer::RGGB).unwrap();
        engine.release(&mut isp, stats).unwrap();
    }
}
