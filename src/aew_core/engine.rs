//! Engine orchestrator
//!
//! Owns the configuration, descriptors, device handles and both
//! controllers, and drives one statistics -> white balance -> exposure
//! iteration per call. Dropping the engine closes the devices it owns;
//! borrowed descriptors stay with the caller.

mod config;
mod orchestrator;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use orchestrator::Engine;
