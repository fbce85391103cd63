//! Hardware interface adapters
//!
//! The control core never touches devices directly; it talks to a camera
//! sensor and an ISP statistics module through the trait seams defined
//! here. Each SoC/sensor combination provides its own implementations.

mod device;
mod interface;
mod sensor;

pub use device::{DeviceHandle, DeviceSet, DeviceSource, DeviceSpec, Ownership};
pub use interface::{InterfaceDescriptor, IspOps, WindowLimits};
pub use sensor::{SensorDescriptor, SensorOps};
