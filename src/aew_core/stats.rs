//! Statistics windowing engine
//!
//! Splits the image into a grid of statistics windows sized within the
//! hardware limits, drives the ISP to configure the grid and pulls fresh
//! per-window R/G/B statistics once per control iteration.

mod engine;
pub mod types;
mod windowing;

pub use engine::StatEngine;
pub use types::{StatWindowConfig, WindowStat};
pub use windowing::configure;
