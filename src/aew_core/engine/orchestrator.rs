use tracing::{info, instrument, warn};

use crate::aew_core::ae::{AeConfig, AeController};
use crate::aew_core::awb::{AwbConfig, AwbController};
use crate::aew_core::common::error::Result;
use crate::aew_core::engine::config::EngineConfig;
use crate::aew_core::hardware::{DeviceSet, DeviceSpec, InterfaceDescriptor, SensorDescriptor};
use crate::aew_core::stats::{self, StatEngine, StatWindowConfig};

/// Auto white balance / auto exposure engine.
///
/// One instance drives one capture pipeline: the external capture loop
/// calls [`Engine::run`] once per frame and the engine must finish (or
/// fail) before the next frame's statistics are requested. Descriptors
/// and configurations are taken by value at creation, the caller keeps
/// nothing aliased.
pub struct Engine {
    config: EngineConfig,
    sensor: SensorDescriptor,
    interface: InterfaceDescriptor,
    stat_engine: StatEngine,
    awb: AwbController,
    ae: AeController,
    #[allow(dead_code)]
    devices: DeviceSet,
}

impl Engine {
    /// Creates the engine: validates descriptors, opens the devices whose
    /// ownership falls to the engine, computes the statistics window grid
    /// and initializes both controllers. Devices already opened are closed
    /// again when a later step fails.
    pub fn new(
        awb_config: AwbConfig,
        ae_config: AeConfig,
        config: EngineConfig,
        sensor: SensorDescriptor,
        interface: InterfaceDescriptor,
        devices: DeviceSpec,
    ) -> Result<Self> {
        config.validate()?;
        sensor.validate()?;
        interface.validate()?;

        let devices = DeviceSet::open(devices)?;
        let stat_config = stats::configure(
            config.width,
            config.height,
            config.segmentation_factor,
            &interface.limits,
        )?;
        let awb = AwbController::new(awb_config)?;
        let ae = AeController::new(
            ae_config,
            config.width,
            config.height,
            &stat_config,
            sensor.min_gain,
        )?;

        info!(
            "Engine created: {}x{} image, {}x{} statistics windows",
            config.width, config.height, stat_config.h_count, stat_config.v_count
        );
        Ok(Self {
            stat_engine: StatEngine::new(config.width, config.height, stat_config),
            config,
            sensor,
            interface,
            awb,
            ae,
            devices,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stat_config(&self) -> &StatWindowConfig {
        self.stat_engine.config()
    }

    pub fn awb(&self) -> &AwbController {
        &self.awb
    }

    pub fn ae(&self) -> &AeController {
        &self.ae
    }

    /// Executes one control iteration: acquire fresh statistics, run white
    /// balance, run exposure, release the statistics.
    ///
    /// A statistics acquisition failure aborts the iteration before either
    /// controller touches its state. A white balance failure does not stop
    /// the exposure stage, the two act on independent hardware paths; the
    /// first error of the iteration is the one reported. The engine stays
    /// valid for the next call either way.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<()> {
        let stats = {
            let _span = tracing::info_span!("acquire_stats").entered();
            self.stat_engine
                .acquire(self.interface.ops.as_mut(), self.sensor.pattern)?
        };

        let awb_result = {
            let _span = tracing::info_span!("white_balance").entered();
            self.awb.run(&stats, &mut self.sensor, &mut self.interface)
        };
        if let Err(e) = &awb_result {
            warn!("White balance stage failed: {}", e);
        }

        let ae_result = {
            let _span = tracing::info_span!("exposure").entered();
            let stat_config = *self.stat_engine.config();
            self.ae.run(&stats, &stat_config, &mut self.sensor)
        };
        if let Err(e) = &ae_result {
            warn!("Exposure stage failed: {}", e);
        }

        let release_result = self
            .stat_engine
            .release(self.interface.ops.as_mut(), stats);

        awb_result?;
        ae_result?;
        release_result
    }

    /// Coordinates of the exposure region of interest, or an error when
    /// the active metering mode has none.
    pub fn rectangle_coordinates(&self) -> Result<(u32, u32, u32, u32)> {
        self.ae.rectangle_coordinates()
    }
}
