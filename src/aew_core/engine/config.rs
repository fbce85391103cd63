//! Engine configuration types

use crate::aew_core::common::error::{AewError, Result};

/// General engine configuration: captured image geometry and how finely
/// the frame is segmented into statistics windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Width of the captured image in pixels
    pub width: usize,
    /// Height of the captured image in pixels
    pub height: usize,
    /// Percentage (10-100) of the maximum possible window count to use.
    /// Higher values cost more CPU per iteration.
    pub segmentation_factor: u8,
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AewError::InvalidDimensions(self.width, self.height));
        }
        if !(10..=100).contains(&self.segmentation_factor) {
            return Err(AewError::SegmentationOutOfRange(self.segmentation_factor));
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    width: Option<usize>,
    height: Option<usize>,
    segmentation_factor: Option<u8>,
}

impl EngineConfigBuilder {
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    pub fn segmentation_factor(mut self, segmentation_factor: u8) -> Self {
        self.segmentation_factor = Some(segmentation_factor);
        self
    }

    pub fn build(self) -> Result<EngineConfig> {
        let config = EngineConfig {
            width: self.width.unwrap_or(0),
            height: self.height.unwrap_or(0),
            segmentation_factor: self.segmentation_factor.unwrap_or(50),
        };
        config.validate()?;
        Ok(config)
    }
}
