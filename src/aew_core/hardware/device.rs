use std::fs::{File, OpenOptions};
use std::os::fd::RawFd;
use std::path::PathBuf;

use tracing::debug;

use crate::aew_core::common::error::{AewError, Result};

/// Who is responsible for closing a device handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The engine opened the device and closes it at destruction.
    Owned,
    /// The caller supplied the descriptor and keeps responsibility for it.
    Borrowed,
}

/// Where a device handle comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSource {
    /// Path the engine must open itself.
    Open(PathBuf),
    /// File descriptor already opened by the caller.
    Borrowed(RawFd),
}

/// Devices the engine interacts with: the previewer (video processing
/// subsystem), the statistics module and the camera sensor. Each entry is
/// optional since an adapter may not need all three.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSpec {
    pub previewer: Option<DeviceSource>,
    pub stats: Option<DeviceSource>,
    pub sensor: Option<DeviceSource>,
}

/// An opened device handle. Owned handles close their descriptor on drop,
/// borrowed ones never do.
#[derive(Debug)]
pub enum DeviceHandle {
    Owned(File),
    Borrowed(RawFd),
}

impl DeviceHandle {
    pub fn ownership(&self) -> Ownership {
        match self {
            DeviceHandle::Owned(_) => Ownership::Owned,
            DeviceHandle::Borrowed(_) => Ownership::Borrowed,
        }
    }
}

/// The resolved set of device handles held by an engine instance.
///
/// Dropping the set closes exactly the owned handles; a partially opened
/// set dropped on a failed open releases whatever was already acquired.
#[derive(Debug, Default)]
pub struct DeviceSet {
    pub previewer: Option<DeviceHandle>,
    pub stats: Option<DeviceHandle>,
    pub sensor: Option<DeviceHandle>,
}

impl DeviceSet {
    pub fn open(spec: DeviceSpec) -> Result<Self> {
        Ok(Self {
            previewer: open_source("previewer", spec.previewer)?,
            stats: open_source("stats", spec.stats)?,
            sensor: open_source("sensor", spec.sensor)?,
        })
    }
}

fn open_source(name: &str, source: Option<DeviceSource>) -> Result<Option<DeviceHandle>> {
    match source {
        None => Ok(None),
        Some(DeviceSource::Borrowed(fd)) => Ok(Some(DeviceHandle::Borrowed(fd))),
        Some(DeviceSource::Open(path)) => {
            debug!("Opening {} device {}", name, path.display());
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(&path)
                .map_err(|e| {
                    AewError::Acquisition(format!(
                        "cannot open {} device {}: {}",
                        name,
                        path.display(),
                        e
                    ))
                })?;
            Ok(Some(DeviceHandle::Owned(file)))
        }
    }
}
