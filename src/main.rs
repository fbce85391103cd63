use std::sync::{Arc, Mutex};

use aew_engine_rs::aew_core::{
    AeAlgorithm, AeConfig, AwbAlgorithm, AwbConfig, ColorPattern, DeviceSpec, Engine,
    EngineConfig, GainType, InterfaceDescriptor, IspOps, MeteringType, Result, RoiCenter,
    SensorDescriptor, SensorOps, StatWindowConfig, WindowStat, bayer,
    gain::{GainStep, GainTable, from_q10},
    hardware::WindowLimits,
};
use aew_engine_rs::logger;

use tracing::{error, info};

/// Simulated camera shared between the sensor and ISP adapters: a greenish
/// scene whose reported statistics respond to the applied exposure and
/// gains, so the control loop has something to converge on.
struct SimCamera {
    exposure_us: u32,
    gains: (u32, u32, u32),
}

const SCENE_R: f64 = 90.0;
const SCENE_G: f64 = 130.0;
const SCENE_B: f64 = 70.0;
const NOMINAL_EXPOSURE_US: f64 = 20_000.0;

impl SimCamera {
    fn window(&self) -> WindowStat {
        let scale = self.exposure_us as f64 / NOMINAL_EXPOSURE_US;
        let level = |base: f64, q10_gain: u32| {
            (base * scale * from_q10(q10_gain) as f64).min(255.0) as u32
        };
        let r = level(SCENE_R, self.gains.0);
        let g = level(SCENE_G, self.gains.1);
        let b = level(SCENE_B, self.gains.2);
        WindowStat {
            r_avg: r,
            g_avg: g,
            b_avg: b,
            r_max: r,
            g_max: g,
            b_max: b,
            r_min: r,
            g_min: g,
            b_min: b,
        }
    }
}

struct SimSensor {
    camera: Arc<Mutex<SimCamera>>,
}

impl SensorOps for SimSensor {
    fn set_gain(&mut self, q10_r: u32, q10_g: u32, q10_b: u32) -> Result<()> {
        self.camera.lock().unwrap().gains = (q10_r, q10_g, q10_b);
        Ok(())
    }

    fn get_gain(&mut self) -> Result<(u32, u32, u32)> {
        Ok(self.camera.lock().unwrap().gains)
    }

    fn set_exposure(&mut self, exp_time_us: u32) -> Result<()> {
        self.camera.lock().unwrap().exposure_us = exp_time_us;
        Ok(())
    }

    fn get_exposure(&mut self) -> Result<u32> {
        Ok(self.camera.lock().unwrap().exposure_us)
    }
}

struct SimIsp {
    camera: Arc<Mutex<SimCamera>>,
}

impl IspOps for SimIsp {
    fn set_gain(&mut self, _r: u32, _g: u32, _b: u32) -> Result<()> {
        Ok(())
    }

    fn get_gain(&mut self) -> Result<(u32, u32, u32)> {
        Ok((1024, 1024, 1024))
    }

    fn set_stat_parameters(
        &mut self,
        _width: usize,
        _height: usize,
        _config: &StatWindowConfig,
    ) -> Result<()> {
        Ok(())
    }

    fn read_stat_data(
        &mut self,
        config: &StatWindowConfig,
        _pattern: ColorPattern,
    ) -> Result<Vec<WindowStat>> {
        let window = self.camera.lock().unwrap().window();
        Ok(vec![window; config.window_count()])
    }

    fn release_stat_data(&mut self, _config: &StatWindowConfig) -> Result<()> {
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting aew_engine demo...");

    let camera = Arc::new(Mutex::new(SimCamera {
        exposure_us: 20_000,
        gains: (1024, 1024, 1024),
    }));

    let sensor = SensorDescriptor {
        pattern: bayer::GRBG,
        min_exp_time: 100,
        max_exp_time: 100_000,
        min_gain: 1.0,
        max_gain: 8.0,
        gain_table: GainTable::new(vec![
            GainStep { range_end: 4.0, step_n: 1, step_d: 8 },
            GainStep { range_end: 8.0, step_n: 1, step_d: 4 },
        ])?,
        ops: Box::new(SimSensor {
            camera: camera.clone(),
        }),
    };
    let interface = InterfaceDescriptor {
        limits: WindowLimits {
            max_v_window: 128,
            max_h_window: 36,
            min_pxl_v_window: 2,
            max_pxl_v_window: 256,
            min_pxl_h_window: 8,
            max_pxl_h_window: 256,
        },
        min_gain: 1.0,
        max_gain: 16.0,
        gain_table: GainTable::default(),
        ops: Box::new(SimIsp {
            camera: camera.clone(),
        }),
    };

    let config = EngineConfig::builder()
        .width(1280)
        .height(720)
        .segmentation_factor(75)
        .build()?;
    let mut engine = Engine::new(
        AwbConfig {
            algorithm: AwbAlgorithm::GrayWorld,
            gain_type: GainType::Sensor,
        },
        AeConfig {
            algorithm: AeAlgorithm::Ec,
            metering: MeteringType::RectWeighted,
            roi_center: RoiCenter::centered(),
            roi_percentage: 40,
            autogain: true,
        },
        config,
        sensor,
        interface,
        DeviceSpec::default(),
    )?;

    info!(
        "Statistics grid: {}x{} windows",
        engine.stat_config().h_count,
        engine.stat_config().v_count
    );
    if let Ok((left, top, right, bottom)) = engine.rectangle_coordinates() {
        info!("Metering rectangle: ({left}, {top}) - ({right}, {bottom})");
    }

    for frame in 0..12 {
        match engine.run() {
            Ok(()) => {
                let camera = camera.lock().unwrap();
                info!(
                    frame,
                    exposure_us = camera.exposure_us,
                    r_gain = %format!("{:.3}", from_q10(camera.gains.0)),
                    g_gain = %format!("{:.3}", from_q10(camera.gains.1)),
                    b_gain = %format!("{:.3}", from_q10(camera.gains.2)),
                    "Iteration complete"
                );
            }
            Err(e) => error!(frame, "Iteration failed: {}", e),
        }
    }

    Ok(())
}
