//! Auto white balance controller
//!
//! Runs one of several white-balance algorithms over the statistics grid
//! and applies the resulting RGB gain correction either on the sensor
//! (before the statistics hardware) or digitally on the ISP (after it).

mod algorithms;
mod controller;

pub use controller::{AwbAlgorithm, AwbConfig, AwbController, GainType, RgbGains};
