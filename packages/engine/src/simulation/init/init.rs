use crate::core::random::RandomSource;
use crate::domain::settings::PipeSettings;
use crate::spatial::pool::PipePool;

use super::perf_stats::PerfStats;
use super::PipeSimulationCore;

pub(super) fn create_simulation_core(
    settings: PipeSettings,
    width: u32,
    height: u32,
    rng: Box<dyn RandomSource>,
) -> PipeSimulationCore {
    let pool = PipePool::new(settings.pipe_count);
    let mut sim = PipeSimulationCore {
        settings,
        pool,
        width,
        height,
        center: center_of(width, height),
        tick: 0,
        rng,
        respawns: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    };
    init_pipes(&mut sim);
    sim
}

pub(super) fn reset(sim: &mut PipeSimulationCore, width: u32, height: u32) {
    sim.width = width;
    sim.height = height;
    sim.center = center_of(width, height);
    sim.tick = 0;
    sim.respawns = 0;
    sim.pool = PipePool::new(sim.settings.pipe_count);
    sim.perf_stats.reset();
    init_pipes(sim);
}

fn init_pipes(sim: &mut PipeSimulationCore) {
    for slot in 0..sim.pool.count() {
        sim.init_pipe(slot);
    }
}

fn center_of(width: u32, height: u32) -> (f32, f32) {
    (0.5 * width as f32, 0.5 * height as f32)
}
