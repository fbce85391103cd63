//! Auto white balance / auto exposure control core
//!
//! This module implements a closed-loop control engine around a camera
//! sensor and its ISP statistics hardware: per-window brightness/color
//! statistics come in, corrective RGB gains and exposure settings go out
//! through pluggable hardware adapters.

pub mod ae;
pub mod awb;
pub mod bayer;
pub mod common;
pub mod engine;
pub mod gain;
pub mod hardware;
pub mod stats;

pub use common::{AewError, Result};

pub use bayer::ColorPattern;

pub use gain::{GainStep, GainTable};

pub use hardware::{
    DeviceHandle, DeviceSet, DeviceSource, DeviceSpec, InterfaceDescriptor, IspOps, Ownership,
    SensorDescriptor, SensorOps, WindowLimits,
};

pub use stats::{StatEngine, StatWindowConfig, WindowStat};

pub use awb::{AwbAlgorithm, AwbConfig, AwbController, GainType, RgbGains};

pub use ae::{AeAlgorithm, AeConfig, AeController, MeteringType, RoiCenter};

pub use engine::{Engine, EngineConfig, EngineConfigBuilder};
