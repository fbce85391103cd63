//! Auto exposure controller
//!
//! Computes a brightness estimate over the statistics grid using the
//! configured metering mode and steers exposure time (and optionally
//! sensor gain) toward a mid-tone target.

mod controller;
mod metering;

pub use controller::{AeAlgorithm, AeConfig, AeController, MeteringType, RoiCenter};
