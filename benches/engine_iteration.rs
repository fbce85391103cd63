use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use aew_engine_rs::aew_core::{
    AeAlgorithm, AeConfig, AwbAlgorithm, AwbConfig, ColorPattern, DeviceSpec, Engine,
    EngineConfig, GainType, InterfaceDescriptor, IspOps, MeteringType, Result, RoiCenter,
    SensorDescriptor, SensorOps, StatWindowConfig, WindowStat, bayer,
    gain::GainTable,
    hardware::WindowLimits,
};

struct BenchSensor;

impl SensorOps for BenchSensor {
    fn set_gain(&mut self, _r: u32, _g: u32, _b: u32) -> Result<()> {
        Ok(())
    }

    fn get_gain(&mut self) -> Result<(u32, u32, u32)> {
        Ok((1024, 1024, 1024))
    }

    fn set_exposure(&mut self, _exp_time_us: u32) -> Result<()> {
        Ok(())
    }

    fn get_exposure(&mut self) -> Result<u32> {
        Ok(20_000)
    }
}

struct BenchIsp;

impl IspOps for BenchIsp {
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
        let mut stats = Vec::with_capacity(config.window_count());
        for i in 0..config.window_count() {
            let level = 60 + (i as u32 * 7) % 160;
            stats.push(WindowStat {
                r_avg: level,
                g_avg: level + 20,
                b_avg: level.saturating_sub(10),
                r_max: level + 30,
                g_max: level + 50,
                b_max: level + 10,
                r_min: level.saturating_sub(30),
                g_min: level.saturating_sub(10),
                b_min: level.saturating_sub(40),
            });
        }
        Ok(stats)
    }

    fn release_stat_data(&mut self, _config: &StatWindowConfig) -> Result<()> {
        Ok(())
    }
}

fn build_engine(segmentation_factor: u8) -> Engine {
    let sensor = SensorDescriptor {
        pattern: bayer::GRBG,
        min_exp_time: 100,
        max_exp_time: 100_000,
        min_gain: 1.0,
        max_gain: 8.0,
        gain_table: GainTable::default(),
        ops: Box::new(BenchSensor),
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
        ops: Box::new(BenchIsp),
    };
    Engine::new(
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
        EngineConfig {
            width: 1920,
            height: 1080,
            segmentation_factor,
        },
        sensor,
        interface,
        DeviceSpec::default(),
    )
    .expect("engine creation")
}

fn benchmark_iteration_by_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_iteration");

    for sf in [25u8, 50, 100] {
        let mut engine = build_engine(sf);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{sf}%")), &sf, |b, _| {
            b.iter(|| engine.run().expect("iteration"));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_iteration_by_segmentation);
criterion_main!(benches);
