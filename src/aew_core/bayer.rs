//! Bayer color pattern descriptors
//!
//! A Bayer pattern places R, Gr, Gb and B filters on a 2x2 pixel grid.
//! The statistics hardware needs to know at which of the four positions
//! each channel sits to attribute window data to the right channel.

use crate::aew_core::common::error::{AewError, Result};

/// Channel positions inside the 2x2 Bayer cell.
///
/// Each offset is in `[0, 3]` and the four offsets form a permutation of
/// `{0, 1, 2, 3}`. Use the provided constants for the four possible
/// constellations instead of filling this by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPattern {
    /// Position of the red channel
    pub r_offset: u8,
    /// Position of the green-red channel
    pub gr_offset: u8,
    /// Position of the green-blue channel
    pub gb_offset: u8,
    /// Position of the blue channel
    pub b_offset: u8,
}

/// Pattern: Gr R / B Gb
pub const GRBG: ColorPattern = ColorPattern {
    gr_offset: 0,
    r_offset: 1,
    b_offset: 2,
    gb_offset: 3,
};

/// Pattern: B Gb / Gr R
pub const BGGR: ColorPattern = ColorPattern {
    b_offset: 0,
    gb_offset: 1,
    gr_offset: 2,
    r_offset: 3,
};

/// Pattern: R Gr / Gb B
pub const RGGB: ColorPattern = ColorPattern {
    r_offset: 0,
    gr_offset: 1,
    gb_offset: 2,
    b_offset: 3,
};

/// Pattern: Gb B / R Gr
pub const GBRG: ColorPattern = ColorPattern {
    gb_offset: 0,
    b_offset: 1,
    r_offset: 2,
    gr_offset: 3,
};

impl ColorPattern {
    /// Builds a pattern from the four channel positions, rejecting
    /// anything that is not a permutation of `{0, 1, 2, 3}`.
    pub fn new(r_offset: u8, gr_offset: u8, gb_offset: u8, b_offset: u8) -> Result<Self> {
        let pattern = Self {
            r_offset,
            gr_offset,
            gb_offset,
            b_offset,
        };
        pattern.validate()?;
        Ok(pattern)
    }

    pub fn validate(&self) -> Result<()> {
        let offsets = [self.r_offset, self.gr_offset, self.gb_offset, self.b_offset];
        let mut seen = [false; 4];
        for offset in offsets {
            if offset > 3 || seen[offset as usize] {
                return Err(AewError::InvalidDescriptor(format!(
                    "color pattern offsets must be a permutation of 0-3, got \
                     r={} gr={} gb={} b={}",
                    self.r_offset, self.gr_offset, self.gb_offset, self.b_offset
                )));
            }
            seen[offset as usize] = true;
        }
        Ok(())
    }
}
